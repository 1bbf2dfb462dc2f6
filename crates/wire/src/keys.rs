//! Map key conversion
//!
//! Only string keys exist on the wire. Other primitive key types implement
//! [`MapKey`] as non-string keys so that maps using them are rejected with a
//! structural error instead of being silently stringified.

/// Key type of a native map
pub trait MapKey: Sized {
    /// Whether keys of this type are strings
    const STRING_KEYED: bool;

    /// Wire key for this native key, `None` for non-string keys
    fn to_key(&self) -> Option<String>;

    /// Native key for a wire key, `None` for non-string keys
    fn from_key(key: &str) -> Option<Self>;
}

impl MapKey for String {
    const STRING_KEYED: bool = true;

    fn to_key(&self) -> Option<String> {
        Some(self.clone())
    }

    fn from_key(key: &str) -> Option<Self> {
        Some(key.to_string())
    }
}

macro_rules! impl_non_string_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl MapKey for $t {
                const STRING_KEYED: bool = false;

                fn to_key(&self) -> Option<String> {
                    None
                }

                fn from_key(_key: &str) -> Option<Self> {
                    None
                }
            }
        )*
    };
}

impl_non_string_key!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);
