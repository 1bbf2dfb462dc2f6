//! Record types
//!
//! A record is a struct whose named fields become the entries of an `M`
//! attribute. Records are declared through [`record!`](crate::record!), which
//! generates:
//!
//! - [`Record`]: the static field layout plus indexed field accessors
//! - [`Encode`](crate::Encode) and [`Decode`](crate::Decode) through the
//!   resolved field table
//! - [`EmbedSlot`], so the record can be embedded in another one
//!
//! # Field options
//!
//! Options follow the field type after `=>`:
//!
//! | Option | Effect |
//! |--------|--------|
//! | `["key"]` | wire key `key` instead of the field name |
//! | `[omit_empty]` | skip the field on encode when its value is empty |
//! | `["key", omit_empty]` | both of the above |
//! | `[embed]` | promote the fields of an embedded record |
//! | `[skip]` | never encode or decode the field |
//!
//! Embedded fields may be a record, `Box<R>`, `Option<R>` or
//! `Option<Box<R>>`. Optional embeddings are allocated on decode when a key
//! reaches into them, and skipped on encode while absent.
//!
//! # Example
//!
//! ```
//! use attrcodec_wire::{record, decode_value, encode_to_value};
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Audit {
//!         pub author: String => ["created_by"],
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Item {
//!         pub id: u64,
//!         pub tags: Vec<String> => [omit_empty],
//!         pub audit: Option<Audit> => [embed],
//!     }
//! }
//!
//! let item = Item { id: 7, tags: vec![], audit: None };
//! let value = encode_to_value(&item).unwrap();
//! assert_eq!(value.as_map().unwrap().len(), 1);
//!
//! let mut decoded = Item::default();
//! decode_value(&value, &mut decoded).unwrap();
//! assert_eq!(decoded, item);
//! ```

use crate::decode::Decode;
use crate::encode::Encode;
use std::any::TypeId;

/// A struct with named fields that converts to and from `M`
pub trait Record: 'static {
    /// Static layout of this record type
    fn shape() -> RecordShape
    where
        Self: Sized;

    /// Read access to the field at `index` in declaration order
    fn field(&self, index: usize) -> Option<FieldRef<'_>>;

    /// Write access to the field at `index` in declaration order
    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

/// Read access to one record field
pub enum FieldRef<'a> {
    /// A plain field
    Value(&'a dyn Encode),
    /// An embedded record, `None` while an optional embedding is absent
    Embedded(Option<&'a dyn Record>),
    /// A field excluded from conversion
    Skipped,
}

/// Write access to one record field
pub enum FieldMut<'a> {
    /// A plain field
    Value(&'a mut dyn Decode),
    /// An embedded record, allocated if it was absent
    Embedded(&'a mut dyn Record),
    /// A field excluded from conversion
    Skipped,
}

/// Static layout of a record type
#[derive(Debug, Clone)]
pub struct RecordShape {
    pub(crate) name: &'static str,
    pub(crate) type_id: TypeId,
    pub(crate) fields: Vec<FieldShape>,
}

impl RecordShape {
    /// Layout of record type `R` with the given fields in declaration order
    pub fn of<R: 'static>(name: &'static str, fields: Vec<FieldShape>) -> Self {
        Self {
            name,
            type_id: TypeId::of::<R>(),
            fields,
        }
    }

    /// Record type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared fields
    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }
}

/// Static layout of one record field
#[derive(Debug, Clone)]
pub struct FieldShape {
    pub(crate) name: &'static str,
    pub(crate) key: &'static str,
    pub(crate) omit_empty: bool,
    pub(crate) skip: bool,
    pub(crate) embedded: Option<fn() -> RecordShape>,
}

impl FieldShape {
    /// A plain field keyed by its name
    pub fn value(name: &'static str) -> Self {
        Self {
            name,
            key: name,
            omit_empty: false,
            skip: false,
            embedded: None,
        }
    }

    /// An embedded record whose fields are promoted into the parent
    pub fn embedded(name: &'static str, shape: fn() -> RecordShape) -> Self {
        Self {
            embedded: Some(shape),
            ..Self::value(name)
        }
    }

    /// Use `key` on the wire instead of the field name
    pub fn rename(mut self, key: &'static str) -> Self {
        self.key = key;
        self
    }

    /// Skip the field on encode when its value is empty
    pub fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    /// Exclude the field from conversion
    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Native field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Wire key
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Check if this field embeds another record
    pub fn is_embedded(&self) -> bool {
        self.embedded.is_some()
    }
}

// ============================================================================
// Embedding
// ============================================================================

/// A field type that can hold an embedded record
pub trait EmbedSlot {
    /// The embedded record type
    type Target: Record + Default;

    /// The embedded record, if present
    fn slot(&self) -> Option<&dyn Record>;

    /// The embedded record, allocated with `Default` if absent
    fn slot_mut(&mut self) -> &mut dyn Record;
}

impl<R: Record + Default> EmbedSlot for Box<R> {
    type Target = R;

    fn slot(&self) -> Option<&dyn Record> {
        Some(&**self)
    }

    fn slot_mut(&mut self) -> &mut dyn Record {
        &mut **self
    }
}

impl<S: EmbedSlot + Default> EmbedSlot for Option<S> {
    type Target = S::Target;

    fn slot(&self) -> Option<&dyn Record> {
        self.as_ref().and_then(EmbedSlot::slot)
    }

    fn slot_mut(&mut self) -> &mut dyn Record {
        self.get_or_insert_with(S::default).slot_mut()
    }
}

// ============================================================================
// Macros
// ============================================================================

/// Declare a record type
///
/// See the [module documentation](mod@crate::record) for the field options.
/// The struct must implement `Default`, which is what `NULL` decodes to.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(=> [ $($opt:tt)* ])?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn shape() -> $crate::RecordShape {
                $crate::RecordShape::of::<Self>(
                    ::core::stringify!($name),
                    ::std::vec![
                        $( $crate::__record_field!(@shape [$($($opt)*)?] $field: $ty) ),*
                    ],
                )
            }

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn field(&self, index: usize) -> ::core::option::Option<$crate::FieldRef<'_>> {
                let mut next = 0usize;
                $(
                    if index == next {
                        return ::core::option::Option::Some(
                            $crate::__record_field!(@get [$($($opt)*)?] &self.$field)
                        );
                    }
                    next += 1;
                )*
                ::core::option::Option::None
            }

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn field_mut(&mut self, index: usize) -> ::core::option::Option<$crate::FieldMut<'_>> {
                let mut next = 0usize;
                $(
                    if index == next {
                        return ::core::option::Option::Some(
                            $crate::__record_field!(@get_mut [$($($opt)*)?] &mut self.$field)
                        );
                    }
                    next += 1;
                )*
                ::core::option::Option::None
            }
        }

        impl $crate::Encode for $name {
            fn encode(&self) -> ::core::result::Result<$crate::AttributeValue, $crate::EncodeError> {
                $crate::encode::encode_record(self)
            }
        }

        impl $crate::Decode for $name {
            fn decode(
                &mut self,
                value: &$crate::AttributeValue,
            ) -> ::core::result::Result<(), $crate::DecodeError> {
                $crate::decode::decode_record(self, value)
            }
        }

        impl $crate::EmbedSlot for $name {
            type Target = Self;

            fn slot(&self) -> ::core::option::Option<&dyn $crate::Record> {
                ::core::option::Option::Some(self)
            }

            fn slot_mut(&mut self) -> &mut dyn $crate::Record {
                self
            }
        }
    };
}

/// Per-field expansion for [`record!`]
#[doc(hidden)]
#[macro_export]
macro_rules! __record_field {
    (@shape [] $field:ident: $ty:ty) => {
        $crate::FieldShape::value(::core::stringify!($field))
    };
    (@shape [$key:literal] $field:ident: $ty:ty) => {
        $crate::FieldShape::value(::core::stringify!($field)).rename($key)
    };
    (@shape [omit_empty] $field:ident: $ty:ty) => {
        $crate::FieldShape::value(::core::stringify!($field)).omit_empty()
    };
    (@shape [$key:literal, omit_empty] $field:ident: $ty:ty) => {
        $crate::FieldShape::value(::core::stringify!($field))
            .rename($key)
            .omit_empty()
    };
    (@shape [skip] $field:ident: $ty:ty) => {
        $crate::FieldShape::value(::core::stringify!($field)).skip()
    };
    (@shape [embed] $field:ident: $ty:ty) => {
        $crate::FieldShape::embedded(
            ::core::stringify!($field),
            <<$ty as $crate::EmbedSlot>::Target as $crate::Record>::shape,
        )
    };

    (@get [skip] $place:expr) => {
        $crate::FieldRef::Skipped
    };
    (@get [embed] $place:expr) => {
        $crate::FieldRef::Embedded($crate::EmbedSlot::slot($place))
    };
    (@get [$($opt:tt)*] $place:expr) => {
        $crate::FieldRef::Value($place)
    };

    (@get_mut [skip] $place:expr) => {
        $crate::FieldMut::Skipped
    };
    (@get_mut [embed] $place:expr) => {
        $crate::FieldMut::Embedded($crate::EmbedSlot::slot_mut($place))
    };
    (@get_mut [$($opt:tt)*] $place:expr) => {
        $crate::FieldMut::Value($place)
    };
}
