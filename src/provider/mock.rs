#![cfg(any(test, feature = "mock"))]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::{ProviderError, ProviderResult};
use super::{ProviderResponse, RelevanceProvider, TokenUsage};
use crate::models::BackendFamily;

/// One recorded `generate` call.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub prompt: String,
    pub model_id: String,
    pub max_tokens: u32,
}

/// Scripted provider: replies from a queue, then falls back to a fixed reply.
pub struct MockProvider {
    family: BackendFamily,
    fallback: Result<String, String>,
    usage: TokenUsage,
    script: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockProvider {
    /// Always answers with `text`.
    pub fn new(family: BackendFamily, text: impl Into<String>) -> Self {
        Self {
            family,
            fallback: Ok(text.into()),
            usage: TokenUsage::default(),
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with an API error carrying `message`.
    pub fn failing(family: BackendFamily, message: impl Into<String>) -> Self {
        Self {
            fallback: Err(message.into()),
            ..Self::new(family, "")
        }
    }

    /// Usage reported with every successful reply.
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }

    /// Queues replies consumed before the fallback. `Err` entries become API errors.
    pub fn with_script(self, replies: Vec<Result<String, String>>) -> Self {
        self.script
            .lock()
            .expect("mock lock poisoned")
            .extend(replies);
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock lock poisoned").len()
    }
}

#[async_trait]
impl RelevanceProvider for MockProvider {
    fn family(&self) -> BackendFamily {
        self.family
    }

    async fn generate(
        &self,
        prompt: &str,
        model_id: &str,
        max_tokens: u32,
    ) -> ProviderResult<ProviderResponse> {
        let poisoned = || ProviderError::api(self.family, "mock lock poisoned");
        self.calls.lock().map_err(|_| poisoned())?.push(MockCall {
            prompt: prompt.to_string(),
            model_id: model_id.to_string(),
            max_tokens,
        });

        let reply = self
            .script
            .lock()
            .map_err(|_| poisoned())?
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            Ok(text) => Ok(ProviderResponse {
                text,
                usage: self.usage,
            }),
            Err(message) => Err(ProviderError::api(self.family, message)),
        }
    }
}
