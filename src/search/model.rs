use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One query issued by the resolver, in service-neutral form.
///
/// `Display` renders the neutral syntax (`"title"`, `title`,
/// `author:<name> AND "<phrase>"`); backends translate it to their own
/// field syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchQuery {
    /// Whole title as a quoted phrase.
    Phrase(String),
    /// Title without quoting.
    Loose(String),
    /// First author's family name plus a short distinctive title phrase.
    AuthorPhrase {
        /// Family name of the first author.
        author: String,
        /// Distinctive words from the title.
        phrase: String,
    },
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchQuery::Phrase(title) => write!(f, "\"{}\"", title),
            SearchQuery::Loose(title) => write!(f, "{}", title),
            SearchQuery::AuthorPhrase { author, phrase } => {
                write!(f, "author:{} AND \"{}\"", author, phrase)
            }
        }
    }
}

impl SearchQuery {
    /// Short label used in logs.
    pub fn strategy(&self) -> &'static str {
        match self {
            SearchQuery::Phrase(_) => "phrase",
            SearchQuery::Loose(_) => "loose",
            SearchQuery::AuthorPhrase { .. } => "author_phrase",
        }
    }
}

/// A candidate record returned by the search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub authors: Vec<String>,
    /// Externally assigned identifier (e.g. `1706.03762v7`).
    pub canonical_id: String,
    pub abstract_text: String,
    pub categories: Vec<String>,
    pub pdf_url: String,
    pub published: Option<DateTime<Utc>>,
}
