//! In-memory table of enriched records.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use super::columnar;
use super::error::{StoreError, StoreResult};
use super::model::{PaperRecord, RawPaperRecord};

/// Score written for rows with no aggregate score; sorts below every real score.
pub const UNSCORED_SENTINEL: f64 = -1.0;

const REQUIRED_FIELDS: [&str; 2] = ["title", "authors"];

/// Ordered collection of [`PaperRecord`] rows with an optional `score` column.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperTable {
    rows: Vec<PaperRecord>,
    scores: Option<Vec<f64>>,
}

impl PaperTable {
    /// Builds a table preserving input order.
    ///
    /// Fails on empty input or when a record has a blank title or authors.
    pub fn from_records(records: Vec<PaperRecord>) -> StoreResult<Self> {
        if records.is_empty() {
            return Err(StoreError::Empty);
        }
        for (index, record) in records.iter().enumerate() {
            if record.title.trim().is_empty() {
                return Err(StoreError::MissingField {
                    index,
                    field: "title",
                });
            }
            if record.authors.trim().is_empty() {
                return Err(StoreError::MissingField {
                    index,
                    field: "authors",
                });
            }
        }
        debug!(rows = records.len(), "Table built");
        Ok(Self {
            rows: records,
            scores: None,
        })
    }

    /// Builds a table of unresolved rows straight from raw citations.
    pub fn from_raw(records: &[RawPaperRecord]) -> StoreResult<Self> {
        Self::from_records(records.iter().map(PaperRecord::from_raw).collect())
    }

    /// Builds a table from loosely shaped JSON objects.
    ///
    /// `title` and `authors` must be present; canonical fields default to empty.
    pub fn from_json(records: &[Value]) -> StoreResult<Self> {
        let mut rows = Vec::with_capacity(records.len());
        for (index, value) in records.iter().enumerate() {
            for field in REQUIRED_FIELDS {
                if value.get(field).is_none_or(Value::is_null) {
                    return Err(StoreError::MissingField { index, field });
                }
            }
            let row = serde_json::from_value::<PaperRecord>(value.clone())
                .map_err(|source| StoreError::Malformed { index, source })?;
            rows.push(row);
        }
        Self::from_records(rows)
    }

    pub(crate) fn from_parts(rows: Vec<PaperRecord>, scores: Option<Vec<f64>>) -> Self {
        Self { rows, scores }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[PaperRecord] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&PaperRecord> {
        self.rows.get(index)
    }

    /// The `score` column, present only after [`rank`](Self::rank).
    pub fn scores(&self) -> Option<&[f64]> {
        self.scores.as_deref()
    }

    pub fn score_at(&self, index: usize) -> Option<f64> {
        self.scores.as_ref().and_then(|s| s.get(index).copied())
    }

    /// Rows paired with their score, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&PaperRecord, Option<f64>)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row, self.score_at(i)))
    }

    /// First `n` rows paired with their score.
    pub fn top(&self, n: usize) -> impl Iterator<Item = (&PaperRecord, Option<f64>)> + '_ {
        self.iter().take(n)
    }

    pub fn into_rows(self) -> Vec<PaperRecord> {
        self.rows
    }

    /// Collapses rows sharing a `canonical_id`.
    ///
    /// The surviving row sits at the first occurrence's position and is the
    /// most complete duplicate (first seen on ties). Rows without a canonical
    /// id are never merged. Idempotent.
    pub fn deduplicate(self) -> Self {
        let before = self.rows.len();
        let mut first_index: HashMap<String, usize> = HashMap::new();
        let mut kept: Vec<(PaperRecord, Option<f64>)> = Vec::with_capacity(before);

        let scores = self.scores;
        for (i, row) in self.rows.into_iter().enumerate() {
            let score = scores.as_ref().and_then(|s| s.get(i).copied());
            if !row.has_canonical_id() {
                kept.push((row, score));
                continue;
            }
            match first_index.get(&row.canonical_id) {
                Some(&slot) => {
                    if row.completeness() > kept[slot].0.completeness() {
                        kept[slot] = (row, score);
                    }
                }
                None => {
                    first_index.insert(row.canonical_id.clone(), kept.len());
                    kept.push((row, score));
                }
            }
        }

        let removed = before - kept.len();
        if removed > 0 {
            info!(before, after = kept.len(), removed, "Duplicate papers removed");
        }

        let has_scores = scores.is_some();
        let (rows, score_col): (Vec<_>, Vec<_>) = kept.into_iter().unzip();
        Self {
            rows,
            scores: has_scores
                .then(|| score_col.into_iter().map(|s| s.unwrap_or(UNSCORED_SENTINEL)).collect()),
        }
    }

    /// Attaches `score` from `scores` (keyed by `canonical_id`) and sorts
    /// descending. Missing or non-finite scores become [`UNSCORED_SENTINEL`].
    /// The sort is stable so equal scores keep their relative order.
    pub fn rank(self, scores: &HashMap<String, f64>) -> Self {
        let mut paired: Vec<(PaperRecord, f64)> = self
            .rows
            .into_iter()
            .map(|row| {
                let score = scores
                    .get(&row.canonical_id)
                    .copied()
                    .filter(|s| s.is_finite())
                    .unwrap_or(UNSCORED_SENTINEL);
                (row, score)
            })
            .collect();

        paired.sort_by(|a, b| b.1.total_cmp(&a.1));

        let unscored = paired
            .iter()
            .filter(|(_, s)| *s == UNSCORED_SENTINEL)
            .count();
        debug!(rows = paired.len(), unscored, "Table ranked");

        let (rows, score_col): (Vec<_>, Vec<_>) = paired.into_iter().unzip();
        Self {
            rows,
            scores: Some(score_col),
        }
    }

    /// Persists the table in columnar form. Parent directories are created.
    pub fn save(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        columnar::write_table(self, path.as_ref())
    }

    /// Loads a saved table; `Ok(None)` when nothing exists at `path`.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Option<Self>> {
        columnar::read_table(path.as_ref())
    }
}
