//! Type-directed attribute value codec
//!
//! This crate converts native Rust values to and from [`AttributeValue`]:
//!
//! - [`Encode`]: native value to attribute value
//! - [`Decode`]: attribute value overlaid onto an existing native value
//! - [`record!`]: declares structs whose fields become map entries, with
//!   embedded records resolved by breadth-first dominance
//! - [`hooked!`]: routes a type through its [`BinaryMarshal`] or
//!   [`TextMarshal`] hook
//! - [`Dynamic`]: destination for values of unknown shape
//!
//! ## Operations
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | [`encode`] | native value | JSON bytes |
//! | [`encode_to_value`] | native value | attribute value |
//! | [`encode_to_value_or_panic`] | native value | attribute value, panics on error |
//! | [`decode`] | JSON bytes | overlays destination |
//! | [`decode_value`] | attribute value | overlays destination |
//! | [`decode_to_value`] | JSON bytes | attribute value |
//!
//! ## Examples
//!
//! ```
//! use attrcodec_wire::{decode, encode, record};
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Book {
//!         pub title: String => ["Title"],
//!         pub pages: u32,
//!     }
//! }
//!
//! let book = Book { title: "Dune".to_string(), pages: 412 };
//! let bytes = encode(&book).unwrap();
//! assert_eq!(bytes, br#"{"M":{"Title":{"S":"Dune"},"pages":{"N":"412"}}}"#);
//!
//! let mut decoded = Book::default();
//! decode(&bytes, &mut decoded).unwrap();
//! assert_eq!(decoded, book);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decode;
pub mod dynamic;
pub mod encode;
pub mod error;
pub mod fields;
pub mod hooks;
pub mod keys;
pub mod record;

pub use attrcodec_core::{text, AttributeMap, AttributeType, AttributeValue, TextError};
pub use decode::Decode;
pub use dynamic::Dynamic;
pub use encode::Encode;
pub use error::{DecodeError, EncodeError, HookError, HookKind};
pub use fields::{FieldDescriptor, FieldRegistry, RecordFields};
pub use hooks::{BinaryMarshal, TextMarshal};
pub use keys::MapKey;
pub use record::{EmbedSlot, FieldMut, FieldRef, FieldShape, Record, RecordShape};

/// Encode a native value to its JSON text form
pub fn encode<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let attr = value.encode()?;
    Ok(text::render(&attr)?)
}

/// Encode a native value to an attribute value
pub fn encode_to_value<T: Encode + ?Sized>(value: &T) -> Result<AttributeValue, EncodeError> {
    value.encode()
}

/// Encode a native value to an attribute value, panicking on failure
///
/// For values known to be encodable, such as literals in tests or
/// constants.
///
/// # Panics
///
/// Panics if encoding fails, for example on a map with non-string keys or a
/// failing capability hook.
pub fn encode_to_value_or_panic<T: Encode + ?Sized>(value: &T) -> AttributeValue {
    match value.encode() {
        Ok(attr) => attr,
        Err(e) => panic!("cannot encode attribute value: {e}"),
    }
}

/// Parse JSON text and overlay it onto `destination`
pub fn decode<T: Decode + ?Sized>(data: &[u8], destination: &mut T) -> Result<(), DecodeError> {
    let attr = text::parse(data)?;
    destination.decode(&attr)
}

/// Overlay an attribute value onto `destination`
pub fn decode_value<T: Decode + ?Sized>(
    value: &AttributeValue,
    destination: &mut T,
) -> Result<(), DecodeError> {
    destination.decode(value)
}

/// Parse JSON text into an attribute value
pub fn decode_to_value(data: &[u8]) -> Result<AttributeValue, DecodeError> {
    Ok(text::parse(data)?)
}
