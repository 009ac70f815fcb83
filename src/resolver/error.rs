use thiserror::Error;

use crate::search::SearchError;

#[derive(Debug, Error)]
/// Errors returned by the resolver.
pub enum ResolveError {
    /// No strategy produced a candidate.
    #[error("no matching record found for '{title}'")]
    NoMatch {
        /// Title that was searched.
        title: String,
    },

    /// The search backend failed.
    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}

impl ResolveError {
    /// Returns `true` for the recoverable "no candidate" outcome.
    pub fn is_no_match(&self) -> bool {
        matches!(self, ResolveError::NoMatch { .. })
    }
}

/// Convenience result type for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
