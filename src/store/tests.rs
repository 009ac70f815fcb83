use super::*;
use crate::search::SearchHit;
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::collections::HashMap;
use tempfile::TempDir;

fn record(id: &str, title: &str) -> PaperRecord {
    PaperRecord::new(id, title, "Doe, Jane")
}

fn full_record(id: &str, title: &str) -> PaperRecord {
    PaperRecord {
        abstract_text: "An abstract.".to_string(),
        categories: vec!["cs.LG".to_string(), "stat.ML".to_string()],
        pdf_url: format!("http://arxiv.org/pdf/{id}"),
        published: Some(Utc.with_ymd_and_hms(2017, 6, 12, 17, 57, 34).unwrap()),
        venue: Some("NeurIPS".to_string()),
        url: Some("https://scholar.example/x".to_string()),
        source_timestamp: Some("2024-01-05T10:00:00Z".to_string()),
        source_relevance: Some(3),
        ..record(id, title)
    }
}

fn ids(table: &PaperTable) -> Vec<&str> {
    table.rows().iter().map(|r| r.canonical_id.as_str()).collect()
}

#[test]
fn test_author_list_splits_and_trims() {
    let raw = RawPaperRecord::new("T", "A Vaswani,  N Shazeer , ,N Parmar");
    assert_eq!(raw.author_list(), vec!["A Vaswani", "N Shazeer", "N Parmar"]);
    assert!(RawPaperRecord::new("T", "").author_list().is_empty());
}

#[test]
fn test_from_raw_and_hit_keeps_citation_fields() {
    let mut raw = RawPaperRecord::new("Attention Is All You Need", "A Vaswani");
    raw.venue = Some("NeurIPS".to_string());
    raw.relevance = Some(4);
    let hit = SearchHit {
        title: "Attention Is All You Need (v5)".to_string(),
        authors: vec!["Ashish Vaswani".to_string()],
        canonical_id: "1706.03762v5".to_string(),
        abstract_text: "  The dominant\n   sequence models ".to_string(),
        categories: vec!["cs.CL".to_string()],
        pdf_url: "http://arxiv.org/pdf/1706.03762v5".to_string(),
        published: None,
    };

    let rec = PaperRecord::from_raw_and_hit(&raw, hit);
    assert_eq!(rec.title, "Attention Is All You Need");
    assert_eq!(rec.authors, "A Vaswani");
    assert_eq!(rec.canonical_id, "1706.03762v5");
    assert_eq!(rec.abstract_text, "The dominant sequence models");
    assert_eq!(rec.venue.as_deref(), Some("NeurIPS"));
    assert_eq!(rec.source_relevance, Some(4));
}

#[test]
fn test_from_raw_and_hit_fills_blank_authors() {
    let raw = RawPaperRecord::new("Attention Is All You Need", "  ");
    let hit = SearchHit {
        title: "Attention Is All You Need".to_string(),
        authors: vec!["Ashish Vaswani".to_string(), "Noam Shazeer".to_string()],
        canonical_id: "1706.03762v5".to_string(),
        abstract_text: String::new(),
        categories: Vec::new(),
        pdf_url: String::new(),
        published: None,
    };

    let rec = PaperRecord::from_raw_and_hit(&raw, hit);
    assert_eq!(rec.authors, "Ashish Vaswani, Noam Shazeer");
    assert!(PaperTable::from_records(vec![rec]).is_ok());
}

#[test]
fn test_completeness() {
    assert_eq!(record("a", "A").completeness(), 0);
    assert_eq!(full_record("a", "A").completeness(), 4);
}

#[test]
fn test_from_records_preserves_order() {
    let table =
        PaperTable::from_records(vec![record("b", "B"), record("a", "A"), record("c", "C")])
            .unwrap();
    assert_eq!(ids(&table), vec!["b", "a", "c"]);
    assert!(table.scores().is_none());
}

#[test]
fn test_from_records_rejects_empty() {
    assert!(matches!(
        PaperTable::from_records(Vec::new()),
        Err(StoreError::Empty)
    ));
}

#[test]
fn test_from_records_rejects_blank_required_fields() {
    let mut no_authors = record("b", "B");
    no_authors.authors = "  ".to_string();
    let err = PaperTable::from_records(vec![record("a", "A"), no_authors]).unwrap_err();
    assert!(matches!(
        err,
        StoreError::MissingField {
            index: 1,
            field: "authors"
        }
    ));

    let err = PaperTable::from_records(vec![record("a", "")]).unwrap_err();
    assert!(matches!(
        err,
        StoreError::MissingField {
            index: 0,
            field: "title"
        }
    ));
}

#[test]
fn test_from_json_requires_title_and_authors() {
    let ok = PaperTable::from_json(&[json!({
        "title": "X",
        "authors": "Y",
        "canonical_id": "1",
        "abstract": "text",
    })])
    .unwrap();
    assert_eq!(ok.rows()[0].abstract_text, "text");

    let err = PaperTable::from_json(&[json!({"title": "X"})]).unwrap_err();
    assert!(matches!(
        err,
        StoreError::MissingField {
            index: 0,
            field: "authors"
        }
    ));

    let err = PaperTable::from_json(&[json!({"title": "X", "authors": "Y", "categories": 5})])
        .unwrap_err();
    assert!(matches!(err, StoreError::Malformed { index: 0, .. }));
}

#[test]
fn test_from_raw_builds_unresolved_rows() {
    let table = PaperTable::from_raw(&[RawPaperRecord::new("T", "A")]).unwrap();
    assert!(!table.rows()[0].has_canonical_id());
}

#[test]
fn test_deduplicate_keeps_first_position() {
    let table = PaperTable::from_records(vec![
        record("a", "A"),
        record("b", "B"),
        record("a", "A again"),
        record("c", "C"),
    ])
    .unwrap()
    .deduplicate();

    assert_eq!(ids(&table), vec!["a", "b", "c"]);
    assert_eq!(table.rows()[0].title, "A");
}

#[test]
fn test_deduplicate_prefers_more_complete_record() {
    let table = PaperTable::from_records(vec![
        record("a", "sparse"),
        record("b", "B"),
        full_record("a", "complete"),
    ])
    .unwrap()
    .deduplicate();

    assert_eq!(ids(&table), vec!["a", "b"]);
    assert_eq!(table.rows()[0].title, "complete");
}

#[test]
fn test_deduplicate_is_idempotent() {
    let once = PaperTable::from_records(vec![
        record("a", "A"),
        record("a", "A"),
        record("b", "B"),
        record("b", "B"),
    ])
    .unwrap()
    .deduplicate();
    let twice = once.clone().deduplicate();
    assert_eq!(once, twice);
    assert_eq!(once.len(), 2);
}

#[test]
fn test_deduplicate_leaves_unresolved_rows() {
    let table = PaperTable::from_records(vec![record("", "X"), record("", "Y")])
        .unwrap()
        .deduplicate();
    assert_eq!(table.len(), 2);
}

#[test]
fn test_rank_sorts_descending_with_sentinel() {
    let table = PaperTable::from_records(vec![
        record("low", "L"),
        record("none", "N"),
        record("high", "H"),
        record("mid", "M"),
    ])
    .unwrap();
    let scores = HashMap::from([
        ("low".to_string(), 0.1),
        ("high".to_string(), 0.9),
        ("mid".to_string(), 0.5),
    ]);

    let ranked = table.rank(&scores);
    assert_eq!(ids(&ranked), vec!["high", "mid", "low", "none"]);
    assert_eq!(ranked.scores().unwrap(), &[0.9, 0.5, 0.1, UNSCORED_SENTINEL]);
}

#[test]
fn test_rank_is_stable_for_ties() {
    let table = PaperTable::from_records(vec![
        record("a", "A"),
        record("b", "B"),
        record("c", "C"),
    ])
    .unwrap();
    let scores = HashMap::from([
        ("a".to_string(), 0.5),
        ("b".to_string(), 0.7),
        ("c".to_string(), 0.5),
    ]);
    assert_eq!(ids(&table.rank(&scores)), vec!["b", "a", "c"]);
}

#[test]
fn test_rank_treats_non_finite_as_unscored() {
    let table = PaperTable::from_records(vec![record("a", "A"), record("b", "B")]).unwrap();
    let scores = HashMap::from([("a".to_string(), f64::NAN), ("b".to_string(), 0.0)]);
    let ranked = table.rank(&scores);
    assert_eq!(ids(&ranked), vec!["b", "a"]);
    assert_eq!(ranked.score_at(1), Some(UNSCORED_SENTINEL));
}

#[test]
fn test_top_limits_rows() {
    let table = PaperTable::from_records(vec![record("a", "A"), record("b", "B")])
        .unwrap()
        .rank(&HashMap::from([("b".to_string(), 0.4)]));
    let top: Vec<_> = table.top(1).collect();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].0.canonical_id, "b");
    assert_eq!(top[0].1, Some(0.4));
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("papers.rkyv");

    let table = PaperTable::from_records(vec![full_record("1706.03762v5", "A"), record("b", "B")])
        .unwrap()
        .rank(&HashMap::from([("b".to_string(), 0.8)]));
    table.save(&path).unwrap();

    let loaded = PaperTable::load(&path).unwrap().expect("table should exist");
    assert_eq!(loaded, table);
    assert_eq!(loaded.scores().unwrap(), &[0.8, UNSCORED_SENTINEL]);
}

#[test]
fn test_save_without_scores_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("papers.rkyv");

    let table = PaperTable::from_records(vec![record("a", "A")]).unwrap();
    table.save(&path).unwrap();

    let loaded = PaperTable::load(&path).unwrap().unwrap();
    assert!(loaded.scores().is_none());
    assert_eq!(loaded, table);
}

#[test]
fn test_save_overwrites_existing_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("papers.rkyv");

    PaperTable::from_records(vec![record("a", "A"), record("b", "B")])
        .unwrap()
        .save(&path)
        .unwrap();
    PaperTable::from_records(vec![record("c", "C")])
        .unwrap()
        .save(&path)
        .unwrap();

    let loaded = PaperTable::load(&path).unwrap().unwrap();
    assert_eq!(ids(&loaded), vec!["c"]);
    assert!(!dir.path().join("papers.rkyv.tmp").exists());
}

#[test]
fn test_load_missing_returns_none() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    assert!(PaperTable::load(dir.path().join("absent.rkyv")).unwrap().is_none());
}

#[test]
fn test_load_rejects_garbage() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let empty = dir.path().join("empty.rkyv");
    std::fs::write(&empty, b"").unwrap();
    assert!(matches!(
        PaperTable::load(&empty),
        Err(StoreError::Corrupt { .. })
    ));

    let junk = dir.path().join("junk.rkyv");
    std::fs::write(&junk, b"definitely not an archive").unwrap();
    assert!(PaperTable::load(&junk).is_err());
}
