//! Convenient imports for attrcodec.
//!
//! ```
//! use attrcodec::prelude::*;
//!
//! let value = encode_to_value(&vec![1, 2]).unwrap();
//! assert_eq!(value.as_list().map(<[_]>::len), Some(2));
//! ```

// Value model
pub use crate::{AttributeMap, AttributeType, AttributeValue};

// Conversion traits
pub use crate::{Decode, Encode};

// Operations
pub use crate::{
    decode, decode_to_value, decode_value, encode, encode_to_value, encode_to_value_or_panic,
};

// Errors
pub use crate::{DecodeError, EncodeError, HookError};

// Declarations
pub use crate::{hooked, record, BinaryMarshal, Dynamic, TextMarshal};
