//! Messages-style backend driven through `genai`.

use async_trait::async_trait;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest, ChatResponse};
use genai::resolver::{AuthData, AuthResolver};
use genai::{Client, ModelIden};
use tracing::debug;

use super::error::{ProviderError, ProviderResult};
use super::{ProviderResponse, RelevanceProvider, SYSTEM_PROMPT, TokenUsage};
use crate::models::BackendFamily;

const FAMILY: BackendFamily = BackendFamily::Messages;

/// Sends a system framing plus one user message and reads the first text block.
pub struct MessagesProvider {
    client: Client,
}

impl MessagesProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let auth = AuthResolver::from_resolver_fn(
            move |_: ModelIden| -> Result<Option<AuthData>, genai::resolver::Error> {
                Ok(Some(AuthData::from_single(api_key.clone())))
            },
        );
        let client = Client::builder().with_auth_resolver(auth).build();
        Self { client }
    }
}

pub(crate) fn build_request(prompt: &str) -> ChatRequest {
    ChatRequest::new(vec![ChatMessage::user(prompt)]).with_system(SYSTEM_PROMPT)
}

pub(crate) fn usage_of(response: &ChatResponse) -> TokenUsage {
    let to_u64 = |v: Option<i32>| v.and_then(|n| u64::try_from(n).ok());
    TokenUsage {
        prompt_tokens: to_u64(response.usage.prompt_tokens),
        completion_tokens: to_u64(response.usage.completion_tokens),
        total_tokens: to_u64(response.usage.total_tokens),
    }
}

#[async_trait]
impl RelevanceProvider for MessagesProvider {
    fn family(&self) -> BackendFamily {
        FAMILY
    }

    async fn generate(
        &self,
        prompt: &str,
        model_id: &str,
        max_tokens: u32,
    ) -> ProviderResult<ProviderResponse> {
        let request = build_request(prompt);
        let options = ChatOptions::default().with_max_tokens(max_tokens);
        debug!(model = model_id, max_tokens, "Sending messages request");

        let response = self
            .client
            .exec_chat(model_id, request, Some(&options))
            .await
            .map_err(|e| ProviderError::api(FAMILY, e))?;

        let text = response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::api(FAMILY, "response contained no text block"))?;

        Ok(ProviderResponse {
            usage: usage_of(&response),
            text,
        })
    }
}
