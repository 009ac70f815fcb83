use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by bibliographic search backends.
pub enum SearchError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("search service returned HTTP {status}: {preview}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Leading part of the response body.
        preview: String,
    },

    /// The service answered with something other than an Atom/XML feed.
    #[error("unexpected content-type '{content_type}': {preview}")]
    UnexpectedContent {
        /// Reported content type.
        content_type: String,
        /// Leading part of the response body.
        preview: String,
    },

    /// The feed could not be parsed.
    #[error("feed parse error: {0}")]
    Parse(String),

    /// Backend misconfiguration (e.g. HTTP client could not be built).
    #[error("search configuration error: {0}")]
    Config(String),
}

/// Convenience result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;
