//! # attrcodec
//!
//! Type-directed codec between native Rust values and tagged attribute
//! values, the seven-variant value model of a document attribute store.
//!
//! ## Quick Start
//!
//! ```
//! use attrcodec::prelude::*;
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct User {
//!         pub name: String,
//!         pub age: u8 => [omit_empty],
//!     }
//! }
//!
//! let user = User { name: "Alice".to_string(), age: 0 };
//! let bytes = attrcodec::encode(&user)?;
//! assert_eq!(bytes, br#"{"M":{"name":{"S":"Alice"}}}"#);
//!
//! let mut decoded = User::default();
//! attrcodec::decode(&bytes, &mut decoded)?;
//! assert_eq!(decoded, user);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Layers
//!
//! - [`attrcodec_core`]: the [`AttributeValue`] model and its JSON text form
//! - [`attrcodec_wire`]: encoding, decoding, records and hooks
//!
//! ## Decoding Is An Overlay
//!
//! Decoding writes into an existing value. A wire variant that does not fit
//! the destination leaves it untouched, maps merge new keys into existing
//! ones, and `NULL` resets to the zero value. Numeric destinations report
//! values that do not fit with an error whose
//! [`is_numeric_overflow`](DecodeError::is_numeric_overflow) flag is set.

#![warn(missing_docs)]

pub mod prelude;

pub use attrcodec_core::{text, AttributeMap, AttributeType, AttributeValue, RawAttributeValue};
pub use attrcodec_wire::{
    decode, decode_to_value, decode_value, encode, encode_to_value, encode_to_value_or_panic,
    hooked, record, BinaryMarshal, Decode, DecodeError, Dynamic, Encode, EncodeError,
    FieldRegistry, HookError, HookKind, MapKey, Record, TextMarshal,
};

/// Lower-level building blocks used by the declaration macros
pub use attrcodec_wire as wire;
