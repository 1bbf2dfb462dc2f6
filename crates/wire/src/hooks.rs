//! Capability hooks
//!
//! A type can take over its own conversion by implementing [`BinaryMarshal`]
//! or [`TextMarshal`] and registering with [`hooked!`](crate::hooked!). The
//! hook replaces the shape rules for that type entirely.
//!
//! | Hook | Encode | Decode |
//! |------|--------|--------|
//! | binary | empty payload is `NULL`, else `B` | consumes `B` |
//! | text | empty payload is `NULL`, else `S` | consumes `S` |
//!
//! On decode `NULL` resets the value to `Default`, and any other variant is
//! left alone. When a type implements both hooks, binary wins (see
//! [`HookKind::resolve`]).
//!
//! ```
//! use attrcodec_wire::{hooked, encode_to_value, AttributeValue, HookError, TextMarshal};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Version(u32, u32);
//!
//! impl TextMarshal for Version {
//!     fn marshal_text(&self) -> Result<String, HookError> {
//!         Ok(format!("{}.{}", self.0, self.1))
//!     }
//!
//!     fn unmarshal_text(&mut self, text: &str) -> Result<(), HookError> {
//!         let (major, minor) = text.split_once('.').ok_or("missing dot")?;
//!         *self = Version(major.parse()?, minor.parse()?);
//!         Ok(())
//!     }
//! }
//!
//! hooked!(Version: text);
//!
//! assert_eq!(encode_to_value(&Version(1, 2)).unwrap(), AttributeValue::text("1.2"));
//! ```

use crate::error::{DecodeError, EncodeError, HookError, HookKind};
use attrcodec_core::AttributeValue;

/// Conversion to and from a byte payload
pub trait BinaryMarshal {
    /// Produce the byte payload
    fn marshal_binary(&self) -> Result<Vec<u8>, HookError>;

    /// Replace this value from a byte payload
    fn unmarshal_binary(&mut self, data: &[u8]) -> Result<(), HookError>;
}

/// Conversion to and from a string payload
pub trait TextMarshal {
    /// Produce the string payload
    fn marshal_text(&self) -> Result<String, HookError>;

    /// Replace this value from a string payload
    fn unmarshal_text(&mut self, text: &str) -> Result<(), HookError>;
}

/// Encode through the binary hook
pub fn encode_binary<T: BinaryMarshal + ?Sized>(value: &T) -> Result<AttributeValue, EncodeError> {
    let data = value.marshal_binary().map_err(|source| EncodeError::Hook {
        kind: HookKind::Binary,
        source,
    })?;
    if data.is_empty() {
        return Ok(AttributeValue::Null);
    }
    Ok(AttributeValue::Binary(data))
}

/// Encode through the text hook
pub fn encode_text<T: TextMarshal + ?Sized>(value: &T) -> Result<AttributeValue, EncodeError> {
    let text = value.marshal_text().map_err(|source| EncodeError::Hook {
        kind: HookKind::Text,
        source,
    })?;
    if text.is_empty() {
        return Ok(AttributeValue::Null);
    }
    Ok(AttributeValue::Text(text))
}

/// Decode through the binary hook
pub fn decode_binary<T: BinaryMarshal + Default>(
    value: &mut T,
    attr: &AttributeValue,
) -> Result<(), DecodeError> {
    match attr {
        AttributeValue::Binary(data) => {
            value
                .unmarshal_binary(data)
                .map_err(|source| DecodeError::Hook {
                    kind: HookKind::Binary,
                    source,
                })
        }
        AttributeValue::Null => {
            *value = T::default();
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Decode through the text hook
pub fn decode_text<T: TextMarshal + Default>(
    value: &mut T,
    attr: &AttributeValue,
) -> Result<(), DecodeError> {
    match attr {
        AttributeValue::Text(text) => {
            value.unmarshal_text(text).map_err(|source| DecodeError::Hook {
                kind: HookKind::Text,
                source,
            })
        }
        AttributeValue::Null => {
            *value = T::default();
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Route a type's conversion through its capability hooks
///
/// ```ignore
/// hooked!(Token: binary);
/// hooked!(Version: text);
/// hooked!(Key: binary, text);   // binary wins
/// ```
#[macro_export]
macro_rules! hooked {
    ($ty:ty: binary $(, text)?) => {
        $crate::__hooked!($ty, encode_binary, decode_binary);
    };
    ($ty:ty: text, binary) => {
        $crate::__hooked!($ty, encode_binary, decode_binary);
    };
    ($ty:ty: text) => {
        $crate::__hooked!($ty, encode_text, decode_text);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __hooked {
    ($ty:ty, $encode:ident, $decode:ident) => {
        impl $crate::Encode for $ty {
            fn encode(&self) -> ::core::result::Result<$crate::AttributeValue, $crate::EncodeError> {
                $crate::hooks::$encode(self)
            }
        }

        impl $crate::Decode for $ty {
            fn decode(
                &mut self,
                value: &$crate::AttributeValue,
            ) -> ::core::result::Result<(), $crate::DecodeError> {
                $crate::hooks::$decode(self, value)
            }
        }
    };
}
