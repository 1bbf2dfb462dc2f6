//! Attribute value model
//!
//! This crate defines the tagged union that native values are converted to,
//! and its JSON text projection:
//!
//! - [`AttributeValue`]: exactly one of binary, boolean, string, number,
//!   null, map or list
//! - [`RawAttributeValue`]: the literal wire object, one optional slot per
//!   type key
//! - [`text::render`] / [`text::parse`]: bytes in and out
//!
//! ## Examples
//!
//! ```
//! use attrcodec_core::{text, AttributeValue};
//!
//! let value = AttributeValue::number("42");
//! let bytes = text::render(&value).unwrap();
//! assert_eq!(bytes, br#"{"N":"42"}"#);
//! assert_eq!(text::parse(&bytes).unwrap(), value);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod raw;
pub mod text;
pub mod value;

pub use error::TextError;
pub use raw::RawAttributeValue;
pub use value::{AttributeMap, AttributeType, AttributeValue};
