use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
/// Errors returned by the record store.
pub enum StoreError {
    /// No records were supplied to build a table.
    #[error("no records provided to build a table")]
    Empty,

    /// A record lacks a mandatory field.
    #[error("record {index} is missing required field '{field}'")]
    MissingField {
        /// Position of the offending record.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A JSON record could not be decoded.
    #[error("record {index} is malformed: {source}")]
    Malformed {
        /// Position of the offending record.
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The file exists but does not hold a valid table.
    #[error("corrupt table file {path}: {reason}")]
    Corrupt {
        /// File path.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
