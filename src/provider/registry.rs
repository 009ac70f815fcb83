//! Family → provider lookup.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::RelevanceProvider;
use super::error::{ProviderError, ProviderResult};
use crate::config::{Config, Credentials};
use crate::models::BackendFamily;

/// Providers keyed by [`BackendFamily`], plus the reason each missing family
/// is unavailable.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<BackendFamily, Arc<dyn RelevanceProvider>>,
    unavailable: HashMap<BackendFamily, String>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("available", &self.providers.keys().collect::<Vec<_>>())
            .field("unavailable", &self.unavailable)
            .finish()
    }
}

impl ProviderRegistry {
    /// Registry with no providers; every family resolves as unavailable.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the real backends for which credentials exist.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::empty();
        registry.install_chat_completion(config, &config.credentials);
        registry.install_messages(&config.credentials);
        debug!(registry = ?registry, "Provider registry built");
        registry
    }

    #[cfg(feature = "openai")]
    fn install_chat_completion(&mut self, config: &Config, credentials: &Credentials) {
        let Some(key) = credentials.openai_api_key.as_deref() else {
            self.mark_unavailable(BackendFamily::ChatCompletion, "OPENAI_API_KEY is not set");
            return;
        };
        match super::ChatCompletionProvider::new(
            key,
            config.openai_base_url.as_str(),
            config.http_timeout(),
        ) {
            Ok(provider) => {
                self.providers
                    .insert(BackendFamily::ChatCompletion, Arc::new(provider));
            }
            Err(e) => {
                warn!(error = %e, "Chat-completion provider could not be created");
                self.mark_unavailable(BackendFamily::ChatCompletion, e.to_string());
            }
        }
    }

    #[cfg(not(feature = "openai"))]
    fn install_chat_completion(&mut self, _config: &Config, _credentials: &Credentials) {
        self.mark_unavailable(
            BackendFamily::ChatCompletion,
            "built without the `openai` feature",
        );
    }

    #[cfg(feature = "anthropic")]
    fn install_messages(&mut self, credentials: &Credentials) {
        match credentials.anthropic_api_key.as_deref() {
            Some(key) => {
                self.providers.insert(
                    BackendFamily::Messages,
                    Arc::new(super::MessagesProvider::new(key)),
                );
            }
            None => self.mark_unavailable(BackendFamily::Messages, "ANTHROPIC_API_KEY is not set"),
        }
    }

    #[cfg(not(feature = "anthropic"))]
    fn install_messages(&mut self, _credentials: &Credentials) {
        self.mark_unavailable(BackendFamily::Messages, "built without the `anthropic` feature");
    }

    fn mark_unavailable(&mut self, family: BackendFamily, reason: impl Into<String>) {
        self.unavailable.insert(family, reason.into());
    }

    /// Registers `provider` under its own family, replacing any previous one.
    pub fn with_provider(mut self, provider: Arc<dyn RelevanceProvider>) -> Self {
        let family = provider.family();
        self.unavailable.remove(&family);
        self.providers.insert(family, provider);
        self
    }

    pub fn is_available(&self, family: BackendFamily) -> bool {
        self.providers.contains_key(&family)
    }

    /// Returns the provider for `family` or [`ProviderError::Unavailable`].
    pub fn resolve(&self, family: BackendFamily) -> ProviderResult<Arc<dyn RelevanceProvider>> {
        if let Some(provider) = self.providers.get(&family) {
            return Ok(Arc::clone(provider));
        }
        let reason = self
            .unavailable
            .get(&family)
            .cloned()
            .unwrap_or_else(|| "no provider registered".to_string());
        Err(ProviderError::unavailable(family, reason))
    }
}
