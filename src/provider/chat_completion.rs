//! Chat-completion backend (OpenAI-compatible `/chat/completions`).

use std::time::Duration;

use async_openai::types::chat::{CreateChatCompletionRequest, CreateChatCompletionResponse};
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::error::{ProviderError, ProviderResult};
use super::{ProviderResponse, RelevanceProvider, SYSTEM_PROMPT, TokenUsage};
use crate::constants::{BODY_PREVIEW_CHARS, char_prefix};
use crate::models::BackendFamily;

const FAMILY: BackendFamily = BackendFamily::ChatCompletion;

/// Calls an OpenAI-compatible chat-completion endpoint.
pub struct ChatCompletionProvider {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ChatCompletionProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> ProviderResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::unavailable(FAMILY, e.to_string()))?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

pub(crate) fn build_request(
    prompt: &str,
    model_id: &str,
    max_tokens: u32,
) -> ProviderResult<CreateChatCompletionRequest> {
    serde_json::from_value(json!({
        "model": model_id,
        "messages": [
            {"role": "system", "content": SYSTEM_PROMPT},
            {"role": "user", "content": prompt},
        ],
        "max_completion_tokens": max_tokens,
    }))
    .map_err(|e| ProviderError::api(FAMILY, format!("invalid request: {e}")))
}

pub(crate) fn extract_completion(
    response: CreateChatCompletionResponse,
) -> ProviderResult<ProviderResponse> {
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::api(FAMILY, "response contained no message content"))?;

    let usage = response
        .usage
        .map(|u| TokenUsage {
            prompt_tokens: Some(u64::from(u.prompt_tokens)),
            completion_tokens: Some(u64::from(u.completion_tokens)),
            total_tokens: Some(u64::from(u.total_tokens)),
        })
        .unwrap_or_default();

    Ok(ProviderResponse { text, usage })
}

#[async_trait]
impl RelevanceProvider for ChatCompletionProvider {
    fn family(&self) -> BackendFamily {
        FAMILY
    }

    async fn generate(
        &self,
        prompt: &str,
        model_id: &str,
        max_tokens: u32,
    ) -> ProviderResult<ProviderResponse> {
        let request = build_request(prompt, model_id, max_tokens)?;
        debug!(model = model_id, max_tokens, "Sending chat completion request");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::api(FAMILY, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::api(
                FAMILY,
                format!("HTTP {}: {}", status.as_u16(), char_prefix(&body, BODY_PREVIEW_CHARS)),
            ));
        }

        let parsed: CreateChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::api(FAMILY, format!("invalid response body: {e}")))?;

        extract_completion(parsed)
    }
}
