//! Breadth-first field dominance
//!
//! Fields are collected level by level: the record's own fields at depth 0,
//! the fields of its embedded records at depth 1, and so on. For every wire
//! key the shallowest depth at which it occurs decides:
//!
//! - exactly one field at that depth: it is the resolved field
//! - two or more: the key is dropped, and deeper occurrences stay dropped
//!
//! An embedded record type is expanded only on the first level where it
//! appears. Every occurrence on that level is expanded, so same-depth
//! collisions between two embeddings of one type are still seen, but a
//! self-embedding record cannot expand forever.

use super::{FieldDescriptor, FieldPath};
use crate::record::RecordShape;
use rustc_hash::{FxHashMap, FxHashSet};
use std::any::TypeId;

/// Outcome of resolving one record type
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Resolved fields ordered by access path
    pub fields: Vec<FieldDescriptor>,
    /// Keys dropped because of a same-depth collision
    pub excluded: Vec<&'static str>,
}

/// Resolve the wire keys of a record type
pub fn resolve_fields(shape: &RecordShape) -> Resolution {
    let mut candidates = Vec::new();
    let mut visited: FxHashSet<TypeId> = FxHashSet::default();
    visited.insert(shape.type_id);

    let mut level = vec![(FieldPath::new(), shape.clone())];
    let mut depth = 0;

    while !level.is_empty() {
        let mut next = Vec::new();
        for (prefix, record) in &level {
            for (index, field) in record.fields.iter().enumerate() {
                if field.skip {
                    continue;
                }
                let mut path = prefix.clone();
                path.push(index);
                match field.embedded {
                    Some(embedded) => next.push((path, embedded())),
                    None => candidates.push(FieldDescriptor {
                        key: field.key,
                        path,
                        omit_empty: field.omit_empty,
                        depth,
                    }),
                }
            }
        }

        next.retain(|(_, embedded)| !visited.contains(&embedded.type_id));
        visited.extend(next.iter().map(|(_, embedded)| embedded.type_id));
        level = next;
        depth += 1;
    }

    dominant(candidates)
}

/// Keep the single shallowest field per key
///
/// `candidates` must be in non-decreasing depth order.
fn dominant(candidates: Vec<FieldDescriptor>) -> Resolution {
    // key -> (shallowest depth, fields at that depth, first index)
    let mut by_key: FxHashMap<&'static str, (usize, usize, usize)> = FxHashMap::default();
    for (index, candidate) in candidates.iter().enumerate() {
        let entry = by_key
            .entry(candidate.key)
            .or_insert((candidate.depth, 0, index));
        if candidate.depth == entry.0 {
            entry.1 += 1;
        }
    }

    let mut excluded: Vec<_> = by_key
        .iter()
        .filter(|(_, entry)| entry.1 > 1)
        .map(|(&key, _)| key)
        .collect();
    excluded.sort_unstable();

    let mut fields: Vec<_> = candidates
        .into_iter()
        .enumerate()
        .filter(|(index, candidate)| {
            matches!(by_key.get(candidate.key), Some(&(_, 1, first)) if first == *index)
        })
        .map(|(_, candidate)| candidate)
        .collect();
    fields.sort_by(|a, b| a.path.cmp(&b.path));

    Resolution { fields, excluded }
}
