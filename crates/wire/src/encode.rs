//! Encoder: native values to attribute values
//!
//! Every encodable type implements [`Encode`]. The shape rules:
//!
//! | Native shape | Attribute value |
//! |--------------|-----------------|
//! | `bool` | `BOOL` |
//! | integers, floats | `N`, shortest round-trip decimal |
//! | `String`, `str` | `S`; empty string is `NULL` |
//! | `Option<T>` | `NULL` when `None`, else `T`'s encoding |
//! | `Box<T>`, `&T`, `Box<dyn Encode>` | the pointee's encoding |
//! | `Vec<u8>`, `[u8]` | `B`; empty is `NULL` |
//! | `Vec<T>`, `[T]` | `L`; empty is `NULL` |
//! | `[T; N]` | `L`, always |
//! | string-keyed maps | `M`; empty is `NULL` |
//! | records | `M`, one entry per resolved field |
//!
//! Empty collections and absent ones cannot be told apart on the wire, so
//! both encode as `NULL`.
//!
//! # Panics
//!
//! Encoding a NaN or infinite float panics: the wire has no representation
//! for it and the input is a caller bug, not bad data.

use crate::error::EncodeError;
use crate::fields::FieldRegistry;
use crate::keys::MapKey;
use crate::record::{FieldRef, Record};
use attrcodec_core::{AttributeMap, AttributeValue};
use std::collections::{BTreeMap, HashMap};

/// Conversion from a native value to an attribute value
pub trait Encode {
    /// Convert this value
    fn encode(&self) -> Result<AttributeValue, EncodeError>;

    /// Whether this is the zero or empty value of its type
    ///
    /// Fields marked `omit_empty` are skipped when this returns true.
    fn is_empty_value(&self) -> bool {
        false
    }

    /// Encode a contiguous run of this type
    ///
    /// Sequences route through here so byte sequences can become `B`
    /// instead of a list of numbers.
    #[doc(hidden)]
    fn encode_slice(items: &[Self]) -> Result<AttributeValue, EncodeError>
    where
        Self: Sized,
    {
        encode_list(items)
    }
}

/// Encode every item into a list, keeping nulls in place
pub(crate) fn encode_list<T: Encode>(items: &[T]) -> Result<AttributeValue, EncodeError> {
    items
        .iter()
        .map(Encode::encode)
        .collect::<Result<Vec<_>, _>>()
        .map(AttributeValue::List)
}

/// Encode a record through its resolved field table
pub fn encode_record<R: Record>(record: &R) -> Result<AttributeValue, EncodeError> {
    let fields = FieldRegistry::global().fields::<R>();
    let mut out = AttributeMap::new();

    for field in fields.iter() {
        let Some(value) = field_value(record, field.path()) else {
            continue;
        };
        if field.omit_empty() && value.is_empty_value() {
            continue;
        }
        out.insert(field.key().to_string(), value.encode()?);
    }

    Ok(AttributeValue::Map(out))
}

/// Follow an access path; `None` when it crosses an absent embedded record
fn field_value<'a>(record: &'a dyn Record, path: &[usize]) -> Option<&'a dyn Encode> {
    let (last, parents) = path.split_last()?;
    let mut current = record;
    for &index in parents {
        current = match current.field(index)? {
            FieldRef::Embedded(Some(inner)) => inner,
            _ => return None,
        };
    }
    match current.field(*last)? {
        FieldRef::Value(value) => Some(value),
        _ => None,
    }
}

// ============================================================================
// Numbers
// ============================================================================

/// Shortest decimal text that parses back to the same float
///
/// Magnitudes outside `[1e-6, 1e21)` use exponent notation.
pub(crate) fn format_float<F>(f: F) -> String
where
    F: Copy + Into<f64> + std::fmt::Display + std::fmt::LowerExp,
{
    let magnitude = f.into().abs();
    assert!(
        magnitude.is_finite(),
        "NaN and infinite floats are not supported: {}",
        f
    );
    if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        format!("{:e}", f)
    } else {
        f.to_string()
    }
}

macro_rules! impl_encode_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl Encode for $t {
                fn encode(&self) -> Result<AttributeValue, EncodeError> {
                    Ok(AttributeValue::Number(self.to_string()))
                }

                fn is_empty_value(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

impl_encode_integer!(i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize);

impl Encode for u8 {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        Ok(AttributeValue::Number(self.to_string()))
    }

    fn is_empty_value(&self) -> bool {
        *self == 0
    }

    fn encode_slice(items: &[Self]) -> Result<AttributeValue, EncodeError> {
        Ok(AttributeValue::Binary(items.to_vec()))
    }
}

macro_rules! impl_encode_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Encode for $t {
                fn encode(&self) -> Result<AttributeValue, EncodeError> {
                    Ok(AttributeValue::Number(format_float(*self)))
                }

                fn is_empty_value(&self) -> bool {
                    *self == 0.0
                }
            }
        )*
    };
}

impl_encode_float!(f32, f64);

// ============================================================================
// Scalars
// ============================================================================

impl Encode for bool {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        Ok(AttributeValue::Bool(*self))
    }

    fn is_empty_value(&self) -> bool {
        !*self
    }
}

impl Encode for str {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        if self.is_empty() {
            Ok(AttributeValue::Null)
        } else {
            Ok(AttributeValue::Text(self.to_string()))
        }
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Encode for String {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        self.as_str().encode()
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Encode for AttributeValue {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        Ok(self.clone())
    }
}

// ============================================================================
// Indirection
// ============================================================================

impl<T: Encode> Encode for Option<T> {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        match self {
            Some(value) => value.encode(),
            None => Ok(AttributeValue::Null),
        }
    }

    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        (**self).encode()
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        (**self).encode()
    }

    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

// ============================================================================
// Sequences
// ============================================================================

impl<T: Encode> Encode for [T] {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        if self.is_empty() {
            return Ok(AttributeValue::Null);
        }
        T::encode_slice(self)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        self.as_slice().encode()
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        encode_list(self)
    }

    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

// ============================================================================
// Maps
// ============================================================================

fn encode_entries<'a, K, V, I>(len: usize, entries: I) -> Result<AttributeValue, EncodeError>
where
    K: MapKey + 'a,
    V: Encode + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    if len == 0 {
        return Ok(AttributeValue::Null);
    }
    if !K::STRING_KEYED {
        return Err(EncodeError::NonStringKey {
            key_type: std::any::type_name::<K>(),
        });
    }

    let mut out = AttributeMap::new();
    for (key, value) in entries {
        let key = key.to_key().ok_or(EncodeError::NonStringKey {
            key_type: std::any::type_name::<K>(),
        })?;
        out.insert(key, value.encode()?);
    }
    Ok(AttributeValue::Map(out))
}

impl<K: MapKey, V: Encode, S> Encode for HashMap<K, V, S> {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        encode_entries(self.len(), self.iter())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K: MapKey, V: Encode> Encode for BTreeMap<K, V> {
    fn encode(&self) -> Result<AttributeValue, EncodeError> {
        encode_entries(self.len(), self.iter())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}
