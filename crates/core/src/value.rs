//! Attribute value model
//!
//! This module defines the tagged union every native value is converted to.
//! An attribute value holds exactly one of seven types:
//!
//! | Variant | Wire key | Payload |
//! |---------|----------|---------|
//! | `Binary` | `B` | raw bytes, base64 on the wire |
//! | `Bool` | `BOOL` | `true` / `false` |
//! | `Text` | `S` | UTF-8 string |
//! | `Number` | `N` | decimal string, kept verbatim |
//! | `Null` | `NULL` | presence marker (`true`) |
//! | `Map` | `M` | string-keyed map of attribute values |
//! | `List` | `L` | ordered list of attribute values |
//!
//! ## Text Form
//!
//! An attribute value renders as a JSON object with exactly one key:
//! `{"S":"foo"}`, `{"N":"42.35"}`, `{"M":{}}`, `{"L":[]}`. Empty maps and
//! lists render as `{}` and `[]`, never as `null`.
//!
//! Numbers are never parsed by the model itself. Precision is whatever the
//! producer wrote.

use crate::error::TextError;
use crate::raw::RawAttributeValue;
use base64::Engine;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// String-keyed map of attribute values
///
/// Ordered so the rendered text is deterministic.
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// Tagged attribute value
///
/// Exactly one variant is populated by construction. The "no value set"
/// state of the wire object only exists in [`RawAttributeValue`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawAttributeValue")]
pub enum AttributeValue {
    /// Raw byte sequence (`B`)
    Binary(Vec<u8>),

    /// Boolean (`BOOL`)
    Bool(bool),

    /// UTF-8 string (`S`)
    Text(String),

    /// Decimal number kept as its string form (`N`)
    Number(String),

    /// Explicit null marker (`NULL`)
    Null,

    /// String-keyed map (`M`)
    Map(AttributeMap),

    /// Ordered list (`L`)
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Build a number from its decimal text
    pub fn number(digits: impl Into<String>) -> Self {
        AttributeValue::Number(digits.into())
    }

    /// Build a text value
    pub fn text(text: impl Into<String>) -> Self {
        AttributeValue::Text(text.into())
    }

    /// The wire type of this value
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::Binary(_) => AttributeType::B,
            AttributeValue::Bool(_) => AttributeType::Bool,
            AttributeValue::Text(_) => AttributeType::S,
            AttributeValue::Number(_) => AttributeType::N,
            AttributeValue::Null => AttributeType::Null,
            AttributeValue::Map(_) => AttributeType::M,
            AttributeValue::List(_) => AttributeType::L,
        }
    }

    /// Check if this is the null marker
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Try to get as bytes
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            AttributeValue::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the decimal text of a number
    pub fn as_number(&self) -> Option<&str> {
        match self {
            AttributeValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Try to get as map
    pub fn as_map(&self) -> Option<&AttributeMap> {
        match self {
            AttributeValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(l) => Some(l),
            _ => None,
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            AttributeValue::Binary(b) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(b);
                map.serialize_entry("B", &encoded)?;
            }
            AttributeValue::Bool(b) => map.serialize_entry("BOOL", b)?,
            AttributeValue::Text(s) => map.serialize_entry("S", s)?,
            AttributeValue::Number(n) => map.serialize_entry("N", n)?,
            AttributeValue::Null => map.serialize_entry("NULL", &true)?,
            AttributeValue::Map(m) => map.serialize_entry("M", m)?,
            AttributeValue::List(l) => map.serialize_entry("L", l)?,
        }
        map.end()
    }
}

impl TryFrom<RawAttributeValue> for AttributeValue {
    type Error = TextError;

    fn try_from(raw: RawAttributeValue) -> Result<Self, Self::Error> {
        raw.into_value().ok_or(TextError::MissingType)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<AttributeMap> for AttributeValue {
    fn from(m: AttributeMap) -> Self {
        AttributeValue::Map(m)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(l: Vec<AttributeValue>) -> Self {
        AttributeValue::List(l)
    }
}

// ============================================================================
// Attribute types
// ============================================================================

/// The seven wire type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeType {
    /// Binary (`B`)
    B,
    /// Boolean (`BOOL`)
    Bool,
    /// List (`L`)
    L,
    /// Map (`M`)
    M,
    /// Number (`N`)
    N,
    /// Null marker (`NULL`)
    Null,
    /// String (`S`)
    S,
}

impl AttributeType {
    /// All types, in tag order
    pub const ALL: [AttributeType; 7] = [
        AttributeType::B,
        AttributeType::Bool,
        AttributeType::L,
        AttributeType::M,
        AttributeType::N,
        AttributeType::Null,
        AttributeType::S,
    ];

    /// The wire key for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::B => "B",
            AttributeType::Bool => "BOOL",
            AttributeType::L => "L",
            AttributeType::M => "M",
            AttributeType::N => "N",
            AttributeType::Null => "NULL",
            AttributeType::S => "S",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TextError::UnknownType(s.to_string()))
    }
}

impl Serialize for AttributeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AttributeType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
