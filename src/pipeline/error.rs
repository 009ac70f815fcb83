use thiserror::Error;

use crate::analyzer::AnalyzerError;
use crate::search::SearchError;
use crate::store::StoreError;

#[derive(Debug, Error)]
/// Errors that stop a pipeline run.
pub enum PipelineError {
    /// At least one research question is required.
    #[error("no research questions supplied")]
    NoQuestions,

    /// Every input paper was unresolved (or there were none).
    #[error("none of the {unresolved} input papers could be resolved")]
    NothingResolved { unresolved: usize },

    /// The input document is not valid JSON of the expected shape.
    #[error("invalid input document: {0}")]
    Input(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience result type for pipeline runs.
pub type PipelineResult<T> = Result<T, PipelineError>;
