//! Paperrank library crate (used by the `paperrank` binary and integration tests).
//!
//! Turns noisy citations harvested from alert emails into ranked, deduplicated
//! paper records.
//!
//! # Public API Surface
//!
//! ## Resolution
//! - [`RateLimiter`], [`ThrottleConfig`] - Request pacing for external services
//! - [`ArxivClient`], [`SearchBackend`], [`SearchQuery`], [`SearchHit`] - Bibliographic search
//! - [`Resolver`], [`ResolveError`] - Ordered fallback search and enrichment
//!
//! ## Relevance Scoring
//! - [`RelevanceProvider`], [`ProviderRegistry`], [`ProviderError`] - LLM backends
//! - [`ModelRegistry`], [`ModelInfo`] - Supported models and pricing
//! - [`RelevanceAnalyzer`], [`RelevanceAssessment`], [`UsageTotals`] - Prompting and parsing
//!
//! ## Storage
//! - [`PaperTable`], [`PaperRecord`], [`RawPaperRecord`] - Deduplication, ranking, persistence
//!
//! ## Orchestration
//! - [`Pipeline`], [`RunReport`] - End-to-end resolve/score/rank run
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod analyzer;
pub mod config;
pub mod constants;
pub mod models;
pub mod pipeline;
pub mod provider;
pub mod resolver;
pub mod search;
pub mod store;
pub mod throttle;

pub use analyzer::{
    AnalyzerError, BatchOutcome, RelevanceAnalyzer, RelevanceAssessment, UsageTotals,
    aggregate_scores,
};
pub use config::{Config, ConfigError, Credentials};
pub use models::{BackendFamily, ModelInfo, ModelRegistry, Pricing};
pub use pipeline::{Pipeline, PipelineError, RunInput, RunReport};
#[cfg(any(test, feature = "mock"))]
pub use provider::MockProvider;
pub use provider::{
    ProviderError, ProviderRegistry, ProviderResponse, RelevanceProvider, TokenUsage,
};
pub use resolver::{EnrichOutcome, ResolveError, Resolver};
#[cfg(any(test, feature = "mock"))]
pub use search::MockSearchBackend;
pub use search::{ArxivClient, SearchBackend, SearchError, SearchHit, SearchQuery};
pub use store::{PaperRecord, PaperTable, RawPaperRecord, StoreError, UNSCORED_SENTINEL};
pub use throttle::{RateLimiter, ThrottleConfig};
