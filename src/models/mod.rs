//! Static registry of supported LLM models.

use std::fmt;


/// Request/response shape shared by a class of LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendFamily {
    /// Single text completion with token counts.
    ChatCompletion,
    /// Message content blocks; token counts may be absent.
    Messages,
}

impl BackendFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendFamily::ChatCompletion => "chat_completion",
            BackendFamily::Messages => "messages",
        }
    }
}

impl fmt::Display for BackendFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-million-token prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
    pub currency: &'static str,
}

impl Pricing {
    pub const fn usd(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            input_per_million,
            output_per_million,
            currency: "USD",
        }
    }
}

/// One registry entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    /// Registry key, e.g. `gpt-4o-mini`.
    pub key: &'static str,
    pub name: &'static str,
    pub family: BackendFamily,
    /// Identifier sent to the backend API.
    pub model_id: &'static str,
    pub description: &'static str,
    pub pricing: Pricing,
    pub context_window: u32,
    pub max_output_tokens: u32,
}

impl ModelInfo {
    /// One-paragraph human summary.
    pub fn describe(&self) -> String {
        format!(
            "{} ({}): {} Backend: {}. Context: {} tokens, max output {}. \
             Pricing: {:.2} {cur} / 1M input, {:.2} {cur} / 1M output.",
            self.name,
            self.key,
            self.description,
            self.family,
            self.context_window,
            self.max_output_tokens,
            self.pricing.input_per_million,
            self.pricing.output_per_million,
            cur = self.pricing.currency,
        )
    }
}

const MODELS: &[ModelInfo] = &[
    ModelInfo {
        key: "gpt-4o",
        name: "GPT-4o",
        family: BackendFamily::ChatCompletion,
        model_id: "gpt-4o",
        description: "Flagship multimodal chat model.",
        pricing: Pricing::usd(2.50, 10.00),
        context_window: 128_000,
        max_output_tokens: 1024,
    },
    ModelInfo {
        key: "gpt-4o-mini",
        name: "GPT-4o mini",
        family: BackendFamily::ChatCompletion,
        model_id: "gpt-4o-mini",
        description: "Small, fast and inexpensive chat model.",
        pricing: Pricing::usd(0.15, 0.60),
        context_window: 128_000,
        max_output_tokens: 1024,
    },
    ModelInfo {
        key: "claude-3-7-sonnet",
        name: "Claude 3.7 Sonnet",
        family: BackendFamily::Messages,
        model_id: "claude-3-7-sonnet-20240229",
        description: "High-capability messages model with a large context.",
        pricing: Pricing::usd(3.00, 15.00),
        context_window: 200_000,
        max_output_tokens: 4096,
    },
    ModelInfo {
        key: "claude-3-5-haiku",
        name: "Claude 3.5 Haiku",
        family: BackendFamily::Messages,
        model_id: "claude-3-5-haiku-20240307",
        description: "Fast, low-cost messages model.",
        pricing: Pricing::usd(0.80, 4.00),
        context_window: 200_000,
        max_output_tokens: 4096,
    },
];

/// Lookup over the fixed model table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelRegistry;

impl ModelRegistry {
    /// Returns the entry for `key`, or `None` for unknown models.
    pub fn get(key: &str) -> Option<&'static ModelInfo> {
        MODELS.iter().find(|m| m.key == key)
    }

    pub fn contains(key: &str) -> bool {
        Self::get(key).is_some()
    }

    /// Keys in registry order.
    pub fn keys() -> impl Iterator<Item = &'static str> {
        MODELS.iter().map(|m| m.key)
    }

    pub fn iter() -> impl Iterator<Item = &'static ModelInfo> {
        MODELS.iter()
    }

    /// Summaries of every model, one per line.
    pub fn describe_all() -> String {
        Self::iter()
            .map(ModelInfo::describe)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
