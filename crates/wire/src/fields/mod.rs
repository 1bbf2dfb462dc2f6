//! Resolved field tables
//!
//! Every record type gets one [`RecordFields`] table, resolved on first use
//! and shared for the rest of the process.
//!
//! # Design
//!
//! - DashMap keyed by `TypeId`: sharded, lock-free reads once built
//! - Entry API on first use: the table is built under the shard lock, so
//!   concurrent first callers never build or store it twice
//! - `Arc<RecordFields>`: readers keep the table without holding a guard
//! - FxHashMap key index: O(1) key lookup while decoding

mod resolve;

pub use resolve::{resolve_fields, Resolution};

use crate::record::{Record, RecordShape};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::any::TypeId;
use std::sync::Arc;
use tracing::debug;

/// Steps from a record to one of its fields, through embedded records
pub type FieldPath = SmallVec<[usize; 4]>;

/// One resolved field of a record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub(crate) key: &'static str,
    pub(crate) path: FieldPath,
    pub(crate) omit_empty: bool,
    pub(crate) depth: usize,
}

impl FieldDescriptor {
    /// Wire key
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Field indices from the outer record down to the field
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Skip on encode when the value is empty
    pub fn omit_empty(&self) -> bool {
        self.omit_empty
    }

    /// Embedding depth, 0 for the record's own fields
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Resolved field table of one record type
#[derive(Debug)]
pub struct RecordFields {
    name: &'static str,
    fields: Vec<FieldDescriptor>,
    by_key: FxHashMap<&'static str, usize>,
}

impl RecordFields {
    /// Resolve the table for a record layout
    pub fn build(shape: &RecordShape) -> Self {
        let Resolution { fields, excluded } = resolve_fields(shape);
        debug!(
            record = shape.name(),
            fields = fields.len(),
            excluded = ?excluded,
            "resolved record fields"
        );

        let by_key = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.key, index))
            .collect();
        Self {
            name: shape.name(),
            fields,
            by_key,
        }
    }

    /// Record type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Field resolved for a wire key
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.by_key.get(key).and_then(|&index| self.fields.get(index))
    }

    /// Resolved fields in path order
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Number of resolved fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field resolved
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

static GLOBAL: Lazy<FieldRegistry> = Lazy::new(FieldRegistry::new);

/// Per-type cache of resolved field tables
///
/// # Thread Safety
///
/// All operations are thread-safe. A table is built at most once per type
/// and never invalidated.
///
/// # Example
///
/// ```ignore
/// use attrcodec_wire::FieldRegistry;
///
/// let fields = FieldRegistry::global().fields::<Item>();
/// for field in fields.iter() {
///     println!("{} -> {:?}", field.key(), field.path());
/// }
/// ```
pub struct FieldRegistry {
    tables: DashMap<TypeId, Arc<RecordFields>>,
}

impl FieldRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tables: DashMap::new(),
        }
    }

    /// Process-wide registry used by the encoder and decoder
    pub fn global() -> &'static FieldRegistry {
        &GLOBAL
    }

    /// Field table for record type `R`, resolving it on first use
    pub fn fields<R: Record>(&self) -> Arc<RecordFields> {
        let type_id = TypeId::of::<R>();
        if let Some(table) = self.tables.get(&type_id) {
            return Arc::clone(table.value());
        }

        let table = self
            .tables
            .entry(type_id)
            .or_insert_with(|| Arc::new(RecordFields::build(&R::shape())));
        Arc::clone(table.value())
    }

    /// Check if the table for `R` has been resolved
    pub fn contains<R: Record>(&self) -> bool {
        self.tables.contains_key(&TypeId::of::<R>())
    }

    /// Number of resolved tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if no table has been resolved
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("tables", &self.tables.len())
            .finish()
    }
}
