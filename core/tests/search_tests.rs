use std::sync::Arc;

use streamdex_core::{Error, InvertedIndex, Normalizer, SearchEngine, SearchMode};

fn index_record(index: &mut InvertedIndex, normalizer: &Normalizer, id: u32, fields: &[&str]) {
    for field in fields {
        for term in normalizer.normalize_text(field) {
            index.insert(&term, id);
        }
    }
}

#[test]
fn one_record_end_to_end() {
    let normalizer = Arc::new(Normalizer::new());
    let mut index = InvertedIndex::new();
    index_record(
        &mut index,
        &normalizer,
        0,
        &["The Great Escape", "A great escape story"],
    );
    index.insert_numeric(1963, 0);

    let engine = SearchEngine::new(Arc::clone(&normalizer));

    assert_eq!(
        engine.search(&index, "great", SearchMode::Strict).unwrap(),
        vec![0]
    );
    // Matches both terms across two fields, so it ranks (alone) on top.
    assert_eq!(
        engine
            .search(&index, "great escape", SearchMode::Broad)
            .unwrap(),
        vec![0]
    );
    assert_eq!(
        engine.search(&index, "1963", SearchMode::Strict).unwrap(),
        vec![0]
    );
    assert!(matches!(
        engine.search(&index, "xyzzy", SearchMode::Strict),
        Err(Error::NoMatch(_))
    ));
}

#[test]
fn cross_field_occurrences_outrank_single_field_matches() {
    let normalizer = Arc::new(Normalizer::new());
    let mut index = InvertedIndex::new();
    // "heist" shows up in two fields of record 0 but only one of record 1.
    index_record(&mut index, &normalizer, 0, &["Heist", "A heist gone wrong"]);
    index_record(&mut index, &normalizer, 1, &["Ocean drama", "A heist at sea"]);

    let engine = SearchEngine::new(Arc::clone(&normalizer));
    let hits = engine.search(&index, "heist", SearchMode::Broad).unwrap();
    assert_eq!(hits, vec![0, 1]);
}

#[test]
fn strict_is_always_a_subset_of_broad() {
    let normalizer = Arc::new(Normalizer::new());
    let mut index = InvertedIndex::new();
    index_record(&mut index, &normalizer, 0, &["Space station drama"]);
    index_record(&mut index, &normalizer, 1, &["Drama at the station"]);
    index_record(&mut index, &normalizer, 2, &["Space walk"]);

    let engine = SearchEngine::new(Arc::clone(&normalizer));
    for query in ["space drama", "station", "space station drama"] {
        let strict = engine.search(&index, query, SearchMode::Strict).unwrap();
        let broad = engine.search(&index, query, SearchMode::Broad).unwrap();
        assert!(
            strict.iter().all(|id| broad.contains(id)),
            "strict ⊄ broad for {query:?}"
        );
    }
}
