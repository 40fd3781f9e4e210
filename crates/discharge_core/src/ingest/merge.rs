//! Cross-source merge with last-write-wins deduplication.
//!
//! # Responsibility
//! - Concatenate ordered sources and keep one item per natural key.
//!
//! # Invariants
//! - Incomplete items are dropped before deduplication.
//! - The last occurrence of a key in the concatenated order survives.
//! - Survivors keep their position from the concatenated order.
//! - No field-level reconciliation happens between duplicates.

use crate::ingest::row::RawRow;
use std::collections::HashMap;

/// Items that can be deduplicated by a natural key.
pub trait NaturalKey {
    fn natural_key(&self) -> &str;

    /// Whether the item is populated enough to take part in the merge.
    fn is_complete(&self) -> bool {
        true
    }
}

impl NaturalKey for RawRow {
    fn natural_key(&self) -> &str {
        self.mrn.as_deref().unwrap_or_default()
    }

    fn is_complete(&self) -> bool {
        RawRow::is_complete(self)
    }
}

/// Merge result with drop counters for load reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome<T> {
    /// At most one item per natural key.
    pub items: Vec<T>,
    /// Items skipped because they were not complete.
    pub incomplete_dropped: usize,
    /// Items superseded by a later occurrence of the same key.
    pub duplicates_dropped: usize,
}

/// Merges ordered sources keeping the last occurrence of each key.
///
/// Sources are concatenated in iteration order, so a later source wins over
/// an earlier one, and within a source a later item wins over an earlier one.
pub fn merge_last_wins<T, I>(sources: I) -> MergeOutcome<T>
where
    T: NaturalKey,
    I: IntoIterator<Item = Vec<T>>,
{
    let mut combined = Vec::new();
    let mut incomplete_dropped = 0;

    for source in sources {
        for item in source {
            if item.is_complete() {
                combined.push(item);
            } else {
                incomplete_dropped += 1;
            }
        }
    }

    let keep = last_occurrence_mask(&combined);
    let total = combined.len();
    let items: Vec<T> = combined
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect();

    MergeOutcome {
        duplicates_dropped: total - items.len(),
        items,
        incomplete_dropped,
    }
}

fn last_occurrence_mask<T: NaturalKey>(items: &[T]) -> Vec<bool> {
    let mut last_index: HashMap<&str, usize> = HashMap::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        last_index.insert(item.natural_key(), index);
    }

    let mut keep = vec![false; items.len()];
    for index in last_index.into_values() {
        keep[index] = true;
    }
    keep
}
