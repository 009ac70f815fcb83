//! LLM provider abstraction.
//!
//! One trait, [`RelevanceProvider`], with a flat implementation per
//! [`BackendFamily`]. Backend-specific errors never leave this module; they are
//! normalized into [`ProviderError`].

#[cfg(feature = "openai")]
pub mod chat_completion;
pub mod error;
#[cfg(feature = "anthropic")]
pub mod messages;
pub mod mock;
pub mod registry;


#[cfg(feature = "openai")]
pub use chat_completion::ChatCompletionProvider;
pub use error::{ProviderError, ProviderResult};
#[cfg(feature = "anthropic")]
pub use messages::MessagesProvider;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockProvider;
pub use registry::ProviderRegistry;

use async_trait::async_trait;

use crate::models::BackendFamily;

/// Role framing sent alongside every relevance prompt.
pub const SYSTEM_PROMPT: &str = "You are an expert research assistant who judges how relevant \
scientific papers are to specific research questions. Follow the requested output format exactly.";

/// Token counts reported by a backend. Absent counts stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens: Some(prompt_tokens),
            completion_tokens: Some(completion_tokens),
            total_tokens: Some(prompt_tokens + completion_tokens),
        }
    }

    /// True when the backend reported no counts at all.
    pub fn is_unreported(&self) -> bool {
        self.prompt_tokens.is_none()
            && self.completion_tokens.is_none()
            && self.total_tokens.is_none()
    }
}

/// Generated text plus usage metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: TokenUsage,
}

/// A backend able to turn a prompt into text.
#[async_trait]
pub trait RelevanceProvider: Send + Sync {
    fn family(&self) -> BackendFamily;

    /// Generates a completion for `prompt` with `model_id`, capped at `max_tokens`.
    async fn generate(
        &self,
        prompt: &str,
        model_id: &str,
        max_tokens: u32,
    ) -> ProviderResult<ProviderResponse>;
}
