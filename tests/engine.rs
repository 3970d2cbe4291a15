//! End-to-end coverage: build, query, persistence round trip.

use std::collections::HashSet;
use std::path::PathBuf;

use question_search::{DocumentRecord, EngineError, SearchEngine, SimilarityScorer};

fn stack_overflow_corpus() -> Vec<DocumentRecord> {
    vec![
        DocumentRecord::new("q0", "c# array index out of range"),
        DocumentRecord::new("q1", "mysql select multiple tables"),
        DocumentRecord::new("q2", "typescript enum description attribute"),
    ]
}

fn build_engine() -> SearchEngine {
    SearchEngine::build(stack_overflow_corpus(), HashSet::new(), 10).unwrap()
}

fn temp_snapshot(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "question-search-it-{}-{}.cbor",
        std::process::id(),
        name
    ))
}

#[test]
fn related_query_finds_the_right_document() {
    let engine = build_engine();
    let hits = engine.query("c# array bounds error", 1).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].1, "c# array index out of range");
    assert!(hits[0].0 > 0.0);
}

#[test]
fn unrelated_query_scores_zero() {
    let engine = build_engine();
    let hits = engine.query("zzz qqq unrelated", 1).unwrap();
    assert_eq!(hits[0].0, 0.0);
}

#[test]
fn top_n_contract_holds() {
    let engine = build_engine();
    let hits = engine.query("mysql tables and typescript enums", 3).unwrap();
    assert_eq!(hits.len(), 3);

    // Ascending output order, best match last.
    for pair in hits.windows(2) {
        assert!(pair[0].0 <= pair[1].0);
    }

    // Each returned score is the rounded cosine similarity between the query
    // vector and that document's stored embedding.
    let query_vectors = [engine
        .vectorizer()
        .transform("mysql tables and typescript enums")
        .unwrap()];
    let scores = SimilarityScorer::new().cosine_similarity(&query_vectors, engine.embeddings());
    for (score, text) in &hits {
        let index = engine
            .documents()
            .iter()
            .position(|doc| &doc.text == text)
            .unwrap();
        let expected = (scores[index][0] * 10_000.0).round() / 10_000.0;
        assert_eq!(*score, expected);
    }
}

#[test]
fn query_output_survives_a_persist_restore_round_trip() {
    let engine = build_engine();
    let path = temp_snapshot("round-trip");
    engine.persist(&path).unwrap();
    let restored = SearchEngine::restore(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    for query in ["c# array bounds error", "select from tables", "zzz"] {
        for n in 1..=3 {
            assert_eq!(
                engine.query(query, n).unwrap(),
                restored.query(query, n).unwrap(),
                "query {query:?} with n={n} diverged after restore"
            );
        }
    }
}

#[test]
fn restore_of_a_missing_snapshot_is_not_found() {
    let err = SearchEngine::restore(temp_snapshot("missing")).unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[test]
fn restore_of_garbage_bytes_is_corrupt() {
    let path = temp_snapshot("garbage");
    std::fs::write(&path, b"definitely not a snapshot").unwrap();
    let err = SearchEngine::restore(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(err, EngineError::Corrupt(_)));
}

#[test]
fn persist_leaves_no_temp_file_behind() {
    let engine = build_engine();
    let path = temp_snapshot("atomic");
    engine.persist(&path).unwrap();
    let tmp = path.with_file_name(format!(
        "{}.tmp",
        path.file_name().unwrap().to_string_lossy()
    ));
    assert!(path.exists());
    assert!(!tmp.exists());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn stop_words_change_the_fitted_vocabulary() {
    let stop_words: HashSet<String> = ["of", "out"].iter().map(|s| s.to_string()).collect();
    let engine = SearchEngine::build(stack_overflow_corpus(), stop_words, 10).unwrap();
    assert!(engine.vectorizer().vocabulary().entry("of").is_none());
    assert!(engine.vectorizer().vocabulary().entry("out").is_none());
    // 14 distinct terms minus the 2 stop words.
    assert_eq!(engine.vectorizer().total_term_count(), 12);
}

#[test]
fn embedding_size_caps_the_vocabulary_but_not_the_total() {
    let engine = SearchEngine::build(stack_overflow_corpus(), HashSet::new(), 10).unwrap();
    assert_eq!(engine.vectorizer().vocabulary().len(), 10);
    // All 14 distinct corpus terms feed the IDF denominator.
    assert_eq!(engine.vectorizer().total_term_count(), 14);
}
