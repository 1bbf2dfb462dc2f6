//! Literal wire object
//!
//! `RawAttributeValue` mirrors the JSON object on the wire: one optional
//! slot per type key. It is the only place where an attribute value with no
//! type set can exist. Such a value fails to serialize and fails to convert
//! into an [`AttributeValue`].
//!
//! When more than one slot is set, the first in the order
//! `B, BOOL, S, N, NULL, M, L` wins.

use crate::error::TextError;
use crate::value::{AttributeMap, AttributeType, AttributeValue};
use base64::Engine;
use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire object with one optional slot per type key
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawAttributeValue {
    /// `B`: bytes, base64 on the wire
    #[serde(rename = "B", default, deserialize_with = "deserialize_base64")]
    pub b: Option<Vec<u8>>,

    /// `BOOL`
    #[serde(rename = "BOOL", default)]
    pub boolean: Option<bool>,

    /// `S`
    #[serde(rename = "S", default)]
    pub s: Option<String>,

    /// `N`
    #[serde(rename = "N", default)]
    pub n: Option<String>,

    /// `NULL`: only presence matters
    #[serde(rename = "NULL", default)]
    pub null: Option<bool>,

    /// `M`
    #[serde(rename = "M", default)]
    pub m: Option<AttributeMap>,

    /// `L`
    #[serde(rename = "L", default)]
    pub l: Option<Vec<AttributeValue>>,
}

impl RawAttributeValue {
    /// The type of the first populated slot, if any
    pub fn attribute_type(&self) -> Option<AttributeType> {
        if self.b.is_some() {
            Some(AttributeType::B)
        } else if self.boolean.is_some() {
            Some(AttributeType::Bool)
        } else if self.s.is_some() {
            Some(AttributeType::S)
        } else if self.n.is_some() {
            Some(AttributeType::N)
        } else if self.null.is_some() {
            Some(AttributeType::Null)
        } else if self.m.is_some() {
            Some(AttributeType::M)
        } else if self.l.is_some() {
            Some(AttributeType::L)
        } else {
            None
        }
    }

    /// Check if at least one slot is populated
    pub fn is_valid(&self) -> bool {
        self.attribute_type().is_some()
    }

    /// Convert into the tagged form, keeping only the winning slot
    pub fn into_value(self) -> Option<AttributeValue> {
        let value = match self.attribute_type()? {
            AttributeType::B => AttributeValue::Binary(self.b?),
            AttributeType::Bool => AttributeValue::Bool(self.boolean?),
            AttributeType::S => AttributeValue::Text(self.s?),
            AttributeType::N => AttributeValue::Number(self.n?),
            AttributeType::Null => AttributeValue::Null,
            AttributeType::M => AttributeValue::Map(self.m?),
            AttributeType::L => AttributeValue::List(self.l?),
        };
        Some(value)
    }
}

impl From<AttributeValue> for RawAttributeValue {
    fn from(value: AttributeValue) -> Self {
        let mut raw = RawAttributeValue::default();
        match value {
            AttributeValue::Binary(b) => raw.b = Some(b),
            AttributeValue::Bool(b) => raw.boolean = Some(b),
            AttributeValue::Text(s) => raw.s = Some(s),
            AttributeValue::Number(n) => raw.n = Some(n),
            AttributeValue::Null => raw.null = Some(true),
            AttributeValue::Map(m) => raw.m = Some(m),
            AttributeValue::List(l) => raw.l = Some(l),
        }
        raw
    }
}

impl Serialize for RawAttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(kind) = self.attribute_type() else {
            return Err(S::Error::custom(TextError::NoValueSet));
        };

        let mut map = serializer.serialize_map(Some(1))?;
        match kind {
            AttributeType::B => {
                let bytes = self.b.as_deref().unwrap_or_default();
                let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
                map.serialize_entry("B", &encoded)?;
            }
            AttributeType::Bool => map.serialize_entry("BOOL", &self.boolean)?,
            AttributeType::S => map.serialize_entry("S", &self.s)?,
            AttributeType::N => map.serialize_entry("N", &self.n)?,
            AttributeType::Null => map.serialize_entry("NULL", &self.null)?,
            AttributeType::M => map.serialize_entry("M", &self.m)?,
            AttributeType::L => map.serialize_entry("L", &self.l)?,
        }
        map.end()
    }
}

fn deserialize_base64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
    let encoded: Option<String> = Option::deserialize(deserializer)?;
    encoded
        .map(|s| {
            base64::engine::general_purpose::STANDARD
                .decode(s)
                .map_err(serde::de::Error::custom)
        })
        .transpose()
}
