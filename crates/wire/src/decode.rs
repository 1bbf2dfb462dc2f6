//! Decoder: attribute values into native destinations
//!
//! Decoding overlays the destination. A variant that has no rule for the
//! destination's shape leaves it untouched; only the rules below write.
//!
//! | Destination | `NULL` | Accepted variant |
//! |-------------|--------|------------------|
//! | `bool` | `false` | `BOOL` |
//! | integers | `0` | `N`, overflow-checked |
//! | floats | `0.0` | `N`, finite and overflow-checked |
//! | `String` | empty | `S` |
//! | `Option<T>` | `None` | anything else allocates a fresh `T` |
//! | records | `Default` | `M`, per resolved field; unknown keys ignored |
//! | string-keyed maps | cleared | `M`, merged into existing entries |
//! | `Vec<u8>` | cleared | `B` copied, `S` base64-decoded |
//! | `[T; N]` | all `Default` | `L`, remaining slots reset |
//! | `Vec<T>` | cleared | `L`, replaced wholesale |
//!
//! Sequences are the exception to the overlay rule: any variant other than
//! `L` resets them, exactly like `NULL`.

use crate::encode::Encode;
use crate::error::DecodeError;
use crate::fields::FieldRegistry;
use crate::keys::MapKey;
use crate::record::{FieldMut, Record};
use attrcodec_core::AttributeValue;
use base64::Engine;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use tracing::trace;

/// Conversion from an attribute value into an existing native value
pub trait Decode {
    /// Overlay `value` onto `self`
    fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError>;

    /// Decode into a vector of this type
    ///
    /// Byte vectors override this to accept `B` and base64 `S`.
    #[doc(hidden)]
    fn decode_vec(items: &mut Vec<Self>, value: &AttributeValue) -> Result<(), DecodeError>
    where
        Self: Sized + Default,
    {
        decode_list(items, value)
    }
}

/// Replace a vector with the decoded list, or clear it for anything else
fn decode_list<T: Decode + Default>(
    items: &mut Vec<T>,
    value: &AttributeValue,
) -> Result<(), DecodeError> {
    match value {
        AttributeValue::List(list) => {
            *items = list
                .iter()
                .map(|attr| {
                    let mut item = T::default();
                    item.decode(attr)?;
                    Ok(item)
                })
                .collect::<Result<Vec<_>, DecodeError>>()?;
        }
        _ => items.clear(),
    }
    Ok(())
}

/// Decode a record through its resolved field table
pub fn decode_record<R: Record + Default>(
    record: &mut R,
    value: &AttributeValue,
) -> Result<(), DecodeError> {
    match value {
        AttributeValue::Map(entries) => {
            let fields = FieldRegistry::global().fields::<R>();
            for (key, attr) in entries {
                let Some(field) = fields.get(key) else {
                    trace!(record = fields.name(), key = %key, "ignoring unknown attribute");
                    continue;
                };
                if let Some(target) = field_target(&mut *record, field.path()) {
                    target.decode(attr)?;
                }
            }
        }
        AttributeValue::Null => *record = R::default(),
        _ => {}
    }
    Ok(())
}

/// Follow an access path, allocating absent embedded records on the way
fn field_target<'a>(record: &'a mut dyn Record, path: &[usize]) -> Option<&'a mut dyn Decode> {
    let (last, parents) = path.split_last()?;
    let mut current = record;
    for &index in parents {
        current = match current.field_mut(index)? {
            FieldMut::Embedded(inner) => inner,
            _ => return None,
        };
    }
    match current.field_mut(*last)? {
        FieldMut::Value(value) => Some(value),
        _ => None,
    }
}

// ============================================================================
// Numbers
// ============================================================================

macro_rules! impl_decode_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl Decode for $t {
                fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError> {
                    match value {
                        AttributeValue::Number(n) => {
                            *self = n
                                .parse::<$t>()
                                .map_err(|_| DecodeError::overflow(n, stringify!($t)))?;
                        }
                        AttributeValue::Null => *self = 0,
                        _ => {}
                    }
                    Ok(())
                }
            }
        )*
    };
}

impl_decode_integer!(i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize);

impl Decode for u8 {
    fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError> {
        match value {
            AttributeValue::Number(n) => {
                *self = n.parse::<u8>().map_err(|_| DecodeError::overflow(n, "u8"))?;
            }
            AttributeValue::Null => *self = 0,
            _ => {}
        }
        Ok(())
    }

    fn decode_vec(items: &mut Vec<Self>, value: &AttributeValue) -> Result<(), DecodeError> {
        match value {
            AttributeValue::Binary(bytes) => *items = bytes.clone(),
            AttributeValue::Text(encoded) => {
                *items = base64::engine::general_purpose::STANDARD.decode(encoded)?;
            }
            AttributeValue::Null => items.clear(),
            other => {
                trace!(found = %other.attribute_type(), "leaving byte destination untouched");
            }
        }
        Ok(())
    }
}

macro_rules! impl_decode_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Decode for $t {
                fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError> {
                    match value {
                        AttributeValue::Number(n) => {
                            let parsed = n
                                .parse::<$t>()
                                .map_err(|_| DecodeError::overflow(n, stringify!($t)))?;
                            if !parsed.is_finite() {
                                return Err(DecodeError::overflow(n, stringify!($t)));
                            }
                            *self = parsed;
                        }
                        AttributeValue::Null => *self = 0.0,
                        _ => {}
                    }
                    Ok(())
                }
            }
        )*
    };
}

impl_decode_float!(f32, f64);

// ============================================================================
// Scalars
// ============================================================================

impl Decode for bool {
    fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError> {
        match value {
            AttributeValue::Bool(b) => *self = *b,
            AttributeValue::Null => *self = false,
            _ => {}
        }
        Ok(())
    }
}

impl Decode for String {
    fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError> {
        match value {
            AttributeValue::Text(s) => s.clone_into(self),
            AttributeValue::Null => self.clear(),
            _ => {}
        }
        Ok(())
    }
}

impl Decode for AttributeValue {
    fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError> {
        value.clone_into(self);
        Ok(())
    }
}

// ============================================================================
// Indirection
// ============================================================================

impl<T: Decode + Default> Decode for Option<T> {
    fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError> {
        if value.is_null() {
            *self = None;
            return Ok(());
        }
        let mut inner = T::default();
        inner.decode(value)?;
        *self = Some(inner);
        Ok(())
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError> {
        (**self).decode(value)
    }
}

impl Decode for Box<dyn Encode> {
    fn decode(&mut self, _value: &AttributeValue) -> Result<(), DecodeError> {
        Err(DecodeError::NonEmptyInterface {
            type_name: "Box<dyn Encode>",
        })
    }
}

// Lets records and containers hold polymorphic values; encodes as NULL.
impl Default for Box<dyn Encode> {
    fn default() -> Self {
        Box::new(AttributeValue::Null)
    }
}

// ============================================================================
// Sequences
// ============================================================================

impl<T: Decode + Default> Decode for Vec<T> {
    fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError> {
        T::decode_vec(self, value)
    }
}

impl<T: Decode + Default, const N: usize> Decode for [T; N] {
    fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError> {
        let list = match value {
            AttributeValue::List(list) => list.as_slice(),
            _ => &[],
        };
        for (index, slot) in self.iter_mut().enumerate() {
            match list.get(index) {
                Some(attr) => slot.decode(attr)?,
                None => *slot = T::default(),
            }
        }
        Ok(())
    }
}

// ============================================================================
// Maps
// ============================================================================

/// Decode map entries, handing each fresh value to `insert`
fn decode_entries<K, V, F>(value: &AttributeValue, mut insert: F) -> Result<bool, DecodeError>
where
    K: MapKey,
    V: Decode + Default,
    F: FnMut(K, V),
{
    let AttributeValue::Map(entries) = value else {
        return Ok(false);
    };
    let non_string = || DecodeError::NonStringKey {
        key_type: std::any::type_name::<K>(),
    };
    if !K::STRING_KEYED {
        return Err(non_string());
    }
    for (key, attr) in entries {
        let key = K::from_key(key).ok_or_else(non_string)?;
        let mut item = V::default();
        item.decode(attr)?;
        insert(key, item);
    }
    Ok(true)
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Decode + Default,
    S: BuildHasher,
{
    fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError> {
        if value.is_null() {
            self.clear();
            return Ok(());
        }
        decode_entries(value, |k, v| {
            self.insert(k, v);
        })?;
        Ok(())
    }
}

impl<K, V> Decode for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: Decode + Default,
{
    fn decode(&mut self, value: &AttributeValue) -> Result<(), DecodeError> {
        if value.is_null() {
            self.clear();
            return Ok(());
        }
        decode_entries(value, |k, v| {
            self.insert(k, v);
        })?;
        Ok(())
    }
}
