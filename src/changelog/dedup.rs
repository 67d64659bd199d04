//! Cross-pass deduplication of change records
//!
//! One `Deduplicator` lives for exactly one changelog run and is threaded by
//! `&mut` through every traversal pass. Structured passes run before the
//! catch-all pass, so the first (context-labelled) occurrence of a change is
//! the one that gets rendered.

use crate::changelog::types::{ChangeRecord, DedupKey};
use std::collections::HashSet;

/// Seen-set of change identities for a single run
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<DedupKey>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time a record's identity is observed and
    /// `false` on every later occurrence.
    pub fn observe(&mut self, record: &ChangeRecord) -> bool {
        self.seen.insert(record.dedup_key())
    }

    /// Number of distinct identities observed so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
