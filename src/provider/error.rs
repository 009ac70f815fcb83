use thiserror::Error;

use crate::models::BackendFamily;

#[derive(Debug, Error)]
/// Errors surfaced by LLM providers.
pub enum ProviderError {
    /// No credential, or the backend is compiled out.
    #[error("{family} provider unavailable: {reason}")]
    Unavailable {
        family: BackendFamily,
        reason: String,
    },

    /// Transport or API failure during generation.
    #[error("{family} provider error: {message}")]
    Api {
        family: BackendFamily,
        message: String,
    },
}

impl ProviderError {
    pub fn unavailable(family: BackendFamily, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            family,
            reason: reason.into(),
        }
    }

    pub fn api(family: BackendFamily, message: impl ToString) -> Self {
        Self::Api {
            family,
            message: message.to_string(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Convenience result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;
