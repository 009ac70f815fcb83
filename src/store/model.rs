//! Record types flowing into and out of the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::collapse_whitespace;
use crate::search::SearchHit;

/// A citation as harvested from an alert email (consumed read-only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPaperRecord {
    pub title: String,
    /// Comma-joined author names.
    pub authors: String,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub relevance: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source_timestamp: Option<String>,
}

impl RawPaperRecord {
    pub fn new(title: impl Into<String>, authors: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            venue: None,
            relevance: None,
            url: None,
            source_timestamp: None,
        }
    }

    /// Splits the comma-joined author string into trimmed, non-empty names.
    pub fn author_list(&self) -> Vec<String> {
        self.authors
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A paper enriched with canonical metadata. `canonical_id` is the
/// deduplication key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub title: String,
    pub authors: String,
    #[serde(default)]
    pub canonical_id: String,
    #[serde(default, alias = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub pdf_url: String,
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source_timestamp: Option<String>,
    #[serde(default)]
    pub source_relevance: Option<i64>,
}

impl PaperRecord {
    /// Minimal record (tests, manual construction).
    pub fn new(
        canonical_id: impl Into<String>,
        title: impl Into<String>,
        authors: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            canonical_id: canonical_id.into(),
            abstract_text: String::new(),
            categories: Vec::new(),
            pdf_url: String::new(),
            published: None,
            venue: None,
            url: None,
            source_timestamp: None,
            source_relevance: None,
        }
    }

    /// Unresolved record: raw fields only, no canonical metadata.
    pub fn from_raw(raw: &RawPaperRecord) -> Self {
        Self {
            venue: raw.venue.clone(),
            url: raw.url.clone(),
            source_timestamp: raw.source_timestamp.clone(),
            source_relevance: raw.relevance,
            ..Self::new(String::new(), raw.title.clone(), raw.authors.clone())
        }
    }

    /// Keeps the citation's own title/authors and takes everything else from the hit.
    /// A blank author string falls back to the hit's author list.
    pub fn from_raw_and_hit(raw: &RawPaperRecord, hit: SearchHit) -> Self {
        let base = Self::from_raw(raw);
        let authors = if base.authors.trim().is_empty() {
            hit.authors.join(", ")
        } else {
            base.authors.clone()
        };
        Self {
            authors,
            canonical_id: hit.canonical_id,
            abstract_text: collapse_whitespace(&hit.abstract_text),
            categories: hit.categories,
            pdf_url: hit.pdf_url,
            published: hit.published,
            ..base
        }
    }

    pub fn has_canonical_id(&self) -> bool {
        !self.canonical_id.trim().is_empty()
    }

    /// Number of populated canonical metadata fields (dedup tie-break).
    pub fn completeness(&self) -> usize {
        [
            !self.abstract_text.trim().is_empty(),
            !self.categories.is_empty(),
            !self.pdf_url.trim().is_empty(),
            self.published.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}
