//! Generic destination
//!
//! [`Dynamic`] decodes whatever arrives without a target type. Each decode
//! replaces the value wholesale, dispatching only on the wire variant:
//!
//! | Variant | Result |
//! |---------|--------|
//! | `B` | `Bytes` |
//! | `BOOL` | `Bool` |
//! | `S` | `Text` |
//! | `N` | `Number`, parsed as `f64` |
//! | `NULL` | `Absent` |
//! | `M` | `Map` of dynamic values |
//! | `L` | `List` of dynamic values |
//!
//! Numbers are lossy here: there is no overflow flag, only an error when the
//! text is not a finite number within the `f64` range. Whatever decodes into
//! a `Dynamic` can be encoded again.

use crate::decode::Decode;
use crate::encode::{format_float, Encode};
use crate::error::{DecodeError, EncodeError};
use attrcodec_core::{AttributeMap, AttributeValue};
use std::collections::HashMap;

/// Value decoded without a concrete destination type
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dynamic {
    /// Nothing, or `NULL`
    #[default]
    Absent,
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Boolean
    Bool(bool),
    /// String
    Text(String),
    /// Number
    Number(f64),
    /// String-keyed map
    Map(HashMap<String, Dynamic>),
    /// Ordered list
    List(Vec<Dynamic>),
}

impl Dynamic {
    /// Check if this is `Absent`
    pub fn is_absent(&self) -> bool {
        matches!(self, Dynamic::Absent)
    }

    /// Get as bool if this is a Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Dynamic::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as f64 if this is a Number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Dynamic::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as str if this is a Text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Dynamic::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as bytes if this is a Bytes
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Dynamic::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get as map if this is a Map
    pub fn as_map(&self) -> Option<&HashMap<String, Dynamic>> {
        match self {
            Dynamic::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get as list if this is a List
    pub fn as_list(&self) -> Option<&[Dynamic]> {
        match self {
            Dynamic::List(l) => Some(l),
            _ => None,
        }
    }

    /// Build from an attribute value
    pub fn from_attribute(value: &AttributeValue) -> Result<Self, DecodeError> {
        let dynamic = match value {
            AttributeValue::Binary(bytes) => Dynamic::Bytes(bytes.clone()),
            AttributeValue::Bool(b) => Dynamic::Bool(*b),
            AttributeValue::Text(s) => Dynamic::Text(s.clone()),
            AttributeValue::Number(n) => Dynamic::Number(parse_number(n)?),
            AttributeValue::Null => Dynamic::Absent,
            AttributeValue::Map(entries) => Dynamic::Map(
                entries
                    .iter()
                    .map(|(key, attr)| Ok((key.clone(), Dynamic::from_attribute(attr)?)))
                    .collect::<Result<_, DecodeError>>()?,
            ),
            AttributeValue::List(items) => Dynamic::List(
                items
                    .iter()
                    .map(Dynamic::from_attribute)
                    .collect::<Result<_, _>>()?,
            ),
        };
        Ok(dynamic)
    }
}

/// Parse a wire number as a finite f64
///
/// NaN, infinity spellings and text beyond the `f64` range are rejected, so
/// every decoded `Number` encodes again.
fn parse_number(text: &str) -> Result<f64, DecodeError> {
    match text.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(DecodeError::InvalidNumber {
            number: text.to_string(),
        }),
    }
}

impl Decode for Dynamic {
    fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError> {
        *self = Dynamic::from_attribute(value)?;
        Ok(())
    }
}

impl Encode for Dynamic {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        match self {
            Dynamic::Absent => Ok(AttributeValue::Null),
            Dynamic::Bytes(bytes) => bytes.encode(),
            Dynamic::Bool(b) => Ok(AttributeValue::Bool(*b)),
            Dynamic::Text(s) => s.encode(),
            Dynamic::Number(n) => Ok(AttributeValue::Number(format_float(*n))),
            Dynamic::Map(entries) => {
                if entries.is_empty() {
                    return Ok(AttributeValue::Null);
                }
                let mut out = AttributeMap::new();
                for (key, value) in entries {
                    out.insert(key.clone(), value.encode()?);
                }
                Ok(AttributeValue::Map(out))
            }
            Dynamic::List(items) => items.encode(),
        }
    }

    fn is_empty_value(&self) -> bool {
        self.is_absent()
    }
}

impl From<bool> for Dynamic {
    fn from(b: bool) -> Self {
        Dynamic::Bool(b)
    }
}

impl From<f64> for Dynamic {
    fn from(n: f64) -> Self {
        Dynamic::Number(n)
    }
}

impl From<&str> for Dynamic {
    fn from(s: &str) -> Self {
        Dynamic::Text(s.to_string())
    }
}

impl From<String> for Dynamic {
    fn from(s: String) -> Self {
        Dynamic::Text(s)
    }
}

impl From<Vec<u8>> for Dynamic {
    fn from(bytes: Vec<u8>) -> Self {
        Dynamic::Bytes(bytes)
    }
}
