use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::normalize::Term;

/// Identifier of one catalog record. The catalog assigns ids
/// monotonically at insertion time and never reuses one.
pub type DocId = u32;

/// Term -> posting list. Append-only: postings are never retracted,
/// record removal is the caller's problem (tombstoned at resolution).
///
/// Posting lists keep insertion order and are not deduplicated: a
/// document contributes one posting per field containing the term, and
/// broad-mode ranking counts on exactly that.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: HashMap<Term, Vec<DocId>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` to the posting list for `term`, creating the list on
    /// first use.
    pub fn insert(&mut self, term: &str, id: DocId) {
        self.postings.entry(term.to_string()).or_default().push(id);
    }

    /// Index a numeric value verbatim under its decimal string, skipping
    /// the text pipeline entirely.
    pub fn insert_numeric(&mut self, value: i64, id: DocId) {
        self.postings.entry(value.to_string()).or_default().push(id);
    }

    /// The stored posting list, or `None` when the term was never
    /// indexed — distinct from an empty downstream result, so callers
    /// can tell "no occurrences" from "unindexed term".
    pub fn lookup(&self, term: &str) -> Option<&[DocId]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    /// Read-only view of the whole mapping, for inspection and tests.
    pub fn snapshot(&self) -> &HashMap<Term, Vec<DocId>> {
        &self.postings
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}
