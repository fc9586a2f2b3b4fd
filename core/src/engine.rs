use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::index::{DocId, InvertedIndex};
use crate::normalize::Normalizer;

/// How a multi-term query combines its posting lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Every query term must match. The result is the set intersection
    /// of the per-term posting lists, in ascending `DocId` order.
    Strict,
    /// Any query term may match. Documents are ranked by how often they
    /// occur across all matched posting lists (more matched terms, or
    /// the same term in more fields, ranks higher), ties kept in
    /// first-appearance order.
    Broad,
}

/// Answers queries against an [`InvertedIndex`], using the same
/// [`Normalizer`] the index was built with.
///
/// Search is a pure request/response operation: the index is borrowed
/// immutably for the duration of the call, so callers serving concurrent
/// lookups need only hand in a consistent view (e.g. under a read lock).
pub struct SearchEngine {
    normalizer: Arc<Normalizer>,
}

impl SearchEngine {
    pub fn new(normalizer: Arc<Normalizer>) -> Self {
        Self { normalizer }
    }

    /// Run `query` against `index`.
    ///
    /// Query terms missing from the index are excluded with a diagnostic
    /// and the search continues; only when every term misses (or the
    /// query normalizes to nothing) does this fail with
    /// [`Error::NoMatch`]. A strict intersection that comes up empty is
    /// a valid empty result, not an error.
    pub fn search(
        &self,
        index: &InvertedIndex,
        query: &str,
        mode: SearchMode,
    ) -> Result<Vec<DocId>> {
        let terms = self.normalizer.normalize_text(query);
        let mut lists: Vec<&[DocId]> = Vec::with_capacity(terms.len());
        for term in &terms {
            match index.lookup(term) {
                Some(postings) => lists.push(postings),
                None => tracing::warn!(%term, "term not indexed, excluding it from the search"),
            }
        }
        if lists.is_empty() {
            return Err(Error::no_match(query));
        }
        Ok(match mode {
            SearchMode::Strict => intersect(&lists),
            SearchMode::Broad => rank_by_occurrence(&lists),
        })
    }
}

/// Set intersection of the posting lists; duplicates within a list
/// collapse. Ascending id order keeps the result deterministic.
fn intersect(lists: &[&[DocId]]) -> Vec<DocId> {
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };
    let mut common: HashSet<DocId> = first.iter().copied().collect();
    for list in rest {
        let present: HashSet<DocId> = list.iter().copied().collect();
        common.retain(|id| present.contains(id));
    }
    let mut out: Vec<DocId> = common.into_iter().collect();
    out.sort_unstable();
    out
}

/// Concatenate the posting lists with multiplicity and order documents
/// by descending occurrence count. `order` holds first appearances, and
/// the stable sort over it is what breaks count ties.
fn rank_by_occurrence(lists: &[&[DocId]]) -> Vec<DocId> {
    let mut counts: HashMap<DocId, usize> = HashMap::new();
    let mut order: Vec<DocId> = Vec::new();
    for &id in lists.iter().flat_map(|list| list.iter()) {
        let count = counts.entry(id).or_insert(0);
        if *count == 0 {
            order.push(id);
        }
        *count += 1;
    }
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SearchEngine {
        SearchEngine::new(Arc::new(Normalizer::new()))
    }

    /// alpha -> [10, 20], beta -> [20, 30, 10], gamma -> [30]
    fn sample_index() -> InvertedIndex {
        let mut index = InvertedIndex::new();
        index.insert("alpha", 10);
        index.insert("alpha", 20);
        index.insert("beta", 20);
        index.insert("beta", 30);
        index.insert("beta", 10);
        index.insert("gamma", 30);
        index
    }

    #[test]
    fn strict_intersects_all_terms() {
        let hits = engine()
            .search(&sample_index(), "alpha beta", SearchMode::Strict)
            .unwrap();
        assert_eq!(hits, vec![10, 20]);
    }

    #[test]
    fn strict_empty_intersection_is_a_valid_empty_result() {
        let hits = engine()
            .search(&sample_index(), "alpha gamma", SearchMode::Strict)
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn broad_ranks_by_occurrence_count() {
        let mut index = sample_index();
        // Push 30 to three occurrences so it outranks everything.
        index.insert("alpha", 30);
        index.insert("beta", 30);
        let hits = engine()
            .search(&index, "alpha beta", SearchMode::Broad)
            .unwrap();
        assert_eq!(hits, vec![30, 10, 20]);
    }

    #[test]
    fn broad_breaks_count_ties_by_first_appearance() {
        // 10 and 20 both occur twice; 10 appears first in alpha's list.
        let hits = engine()
            .search(&sample_index(), "alpha beta", SearchMode::Broad)
            .unwrap();
        assert_eq!(hits, vec![10, 20, 30]);
    }

    #[test]
    fn strict_results_are_a_subset_of_broad_results() {
        let index = sample_index();
        let engine = engine();
        let strict = engine.search(&index, "alpha beta", SearchMode::Strict).unwrap();
        let broad = engine.search(&index, "alpha beta", SearchMode::Broad).unwrap();
        assert!(strict.iter().all(|id| broad.contains(id)));
    }

    #[test]
    fn unknown_terms_are_excluded_not_fatal() {
        let hits = engine()
            .search(&sample_index(), "alpha xyzzy", SearchMode::Strict)
            .unwrap();
        assert_eq!(hits, vec![10, 20]);
    }

    #[test]
    fn all_terms_missing_is_no_match() {
        let err = engine()
            .search(&sample_index(), "xyzzy plugh", SearchMode::Strict)
            .unwrap_err();
        assert!(matches!(err, Error::NoMatch(_)));
    }

    #[test]
    fn stopword_only_query_is_no_match() {
        let err = engine()
            .search(&sample_index(), "the of and", SearchMode::Broad)
            .unwrap_err();
        assert!(matches!(err, Error::NoMatch(_)));
    }

    #[test]
    fn numeric_postings_answer_year_queries() {
        let mut index = sample_index();
        index.insert_numeric(2020, 7);
        let hits = engine().search(&index, "2020", SearchMode::Strict).unwrap();
        assert_eq!(hits, vec![7]);
    }

    #[test]
    fn query_terms_are_normalized_like_indexed_text() {
        let normalizer = Normalizer::new();
        let mut index = InvertedIndex::new();
        for term in normalizer.normalize_text("The Great Escape") {
            index.insert(&term, 0);
        }
        let engine = SearchEngine::new(Arc::new(normalizer));
        let hits = engine.search(&index, "ESCAPING greatly", SearchMode::Strict);
        // "escaping" stems to the same root as "escape"; "greatly" to "great".
        assert_eq!(hits.unwrap(), vec![0]);
    }
}
