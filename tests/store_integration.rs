//! Record store through the public API.

mod common;

use std::collections::HashMap;

use paperrank::{PaperTable, UNSCORED_SENTINEL, aggregate_scores};
use serde_json::json;
use tempfile::TempDir;

use common::record;

#[test]
fn test_dedupe_rank_save_load() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("papers.rkyv");

    let table = PaperTable::from_records(vec![
        record("a", "A"),
        record("b", "B"),
        record("a", "A dup"),
        record("c", "C"),
    ])
    .unwrap()
    .deduplicate();
    assert_eq!(table.len(), 3);

    let ranked = table.rank(&HashMap::from([
        ("c".to_string(), 0.9),
        ("a".to_string(), 0.2),
    ]));
    ranked.save(&path).unwrap();

    let loaded = PaperTable::load(&path).unwrap().unwrap();
    let ids: Vec<_> = loaded.rows().iter().map(|r| r.canonical_id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
    assert_eq!(loaded.scores().unwrap(), &[0.9, 0.2, UNSCORED_SENTINEL]);
    assert_eq!(loaded.clone().deduplicate(), loaded);
}

#[test]
fn test_unranked_table_round_trips_all_columns() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("deep").join("er").join("papers.rkyv");

    let table = PaperTable::from_json(&[
        json!({
            "title": "Attention Is All You Need",
            "authors": "Vaswani, Ashish",
            "canonical_id": "1706.03762v7",
            "abstract": "The dominant sequence transduction models...",
            "categories": ["cs.CL", "cs.LG"],
            "pdf_url": "http://arxiv.org/pdf/1706.03762v7",
            "published": "2017-06-12T17:57:34Z",
            "venue": "NeurIPS",
            "url": "https://scholar.example/a",
            "source_timestamp": "2024-02-01T08:00:00Z",
            "source_relevance": 5
        }),
        json!({"title": "Unresolved", "authors": "Roe, R"}),
    ])
    .unwrap();

    table.save(&path).unwrap();
    let loaded = PaperTable::load(&path).unwrap().unwrap();
    assert_eq!(loaded, table);
    assert!(loaded.scores().is_none());
    assert_eq!(loaded.rows()[0].categories, vec!["cs.CL", "cs.LG"]);
}

#[test]
fn test_load_absent_table() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    assert!(PaperTable::load(dir.path().join("nope.rkyv")).unwrap().is_none());
}

#[test]
fn test_empty_aggregate_ranks_everything_at_sentinel() {
    let table = PaperTable::from_records(vec![record("x", "X"), record("y", "Y")]).unwrap();
    let ranked = table.rank(&aggregate_scores(&Default::default()));
    assert!(ranked.scores().unwrap().iter().all(|s| *s == UNSCORED_SENTINEL));
    let ids: Vec<_> = ranked.rows().iter().map(|r| r.canonical_id.as_str()).collect();
    assert_eq!(ids, vec!["x", "y"]);
}
