//! Removal of structurally identical upstream entries.

use std::collections::HashSet;

use crate::models::RawEntry;

/// Drop entries whose serialized form has already been seen, keeping the
/// first occurrence.
///
/// Serialization order is fixed (typed fields first, then the remaining
/// fields sorted by key), so two entries compare equal regardless of the
/// field order the upstream used.
pub fn dedupe(entries: Vec<RawEntry>) -> Vec<RawEntry> {
    let mut seen = HashSet::with_capacity(entries.len());

    entries
        .into_iter()
        .filter(|entry| match serde_json::to_string(entry) {
            Ok(key) => seen.insert(key),
            Err(_) => true,
        })
        .collect()
}
