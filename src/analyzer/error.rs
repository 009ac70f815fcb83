use thiserror::Error;

#[derive(Debug, Error)]
/// Conditions that abort an analyzer call instead of producing an assessment.
pub enum AnalyzerError {
    /// The caller passed a paper without a mandatory field.
    #[error("paper {index} is missing required field '{field}'")]
    ContractViolation {
        /// Position in the batch (0 for single calls).
        index: usize,
        field: &'static str,
    },

    /// The model key is not in the registry.
    #[error("unsupported model '{key}'")]
    UnsupportedModel { key: String },
}

/// Convenience result type for analyzer calls.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
