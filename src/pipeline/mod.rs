//! End-to-end run: resolve → build → dedupe → analyze → aggregate → rank → save.

pub mod error;
pub mod input;


pub use error::{PipelineError, PipelineResult};
pub use input::RunInput;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::analyzer::{BatchOutcome, RelevanceAnalyzer, UsageTotals, aggregate_scores};
use crate::config::Config;
use crate::provider::ProviderRegistry;
use crate::resolver::Resolver;
use crate::search::{ArxivClient, SearchBackend};
use crate::store::{PaperRecord, PaperTable, RawPaperRecord};
use crate::throttle::RateLimiter;

/// Outcome of [`Pipeline::run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Deduplicated rows sorted by aggregate score, best first.
    pub table: PaperTable,
    pub usage: UsageTotals,
    /// Raw records that resolved to a canonical record.
    pub resolved: usize,
    pub unresolved: usize,
    /// Rows removed by deduplication.
    pub duplicates: usize,
    /// Assessments that failed (provider or parse errors).
    pub failed_assessments: usize,
    /// Set when the ranked table could not be written; the ranking itself is still valid.
    pub save_error: Option<String>,
}

impl RunReport {
    /// First `n` ranked rows with their scores.
    pub fn top(&self, n: usize) -> Vec<(&PaperRecord, f64)> {
        self.table
            .top(n)
            .map(|(row, score)| (row, score.unwrap_or(crate::store::UNSCORED_SENTINEL)))
            .collect()
    }
}

/// Wires a [`Resolver`] and a [`RelevanceAnalyzer`] into one run.
pub struct Pipeline<S: SearchBackend> {
    resolver: Resolver<S>,
    analyzer: RelevanceAnalyzer,
    model_key: String,
    table_path: Option<PathBuf>,
}

impl Pipeline<ArxivClient> {
    /// Production wiring from configuration.
    pub fn from_config(config: &Config) -> PipelineResult<Self> {
        let client = ArxivClient::new(config.search_url.as_str(), config.http_timeout())?;
        let limiter = Arc::new(RateLimiter::new(config.throttle));
        let resolver = Resolver::new(client, limiter).with_max_results(config.max_results);
        let analyzer = RelevanceAnalyzer::new(ProviderRegistry::from_config(config));

        Ok(Self::new(resolver, analyzer, config.model_key.as_str())
            .with_table_path(config.table_path.clone()))
    }
}

impl<S: SearchBackend> Pipeline<S> {
    pub fn new(resolver: Resolver<S>, analyzer: RelevanceAnalyzer, model_key: impl Into<String>) -> Self {
        Self {
            resolver,
            analyzer,
            model_key: model_key.into(),
            table_path: None,
        }
    }

    /// Saves the ranked table to `path` at the end of each run.
    pub fn with_table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.table_path = Some(path.into());
        self
    }

    pub fn resolver(&self) -> &Resolver<S> {
        &self.resolver
    }

    pub fn analyzer(&self) -> &RelevanceAnalyzer {
        &self.analyzer
    }

    pub async fn run(
        &self,
        raw_papers: &[RawPaperRecord],
        questions: &[String],
    ) -> PipelineResult<RunReport> {
        if questions.is_empty() {
            return Err(PipelineError::NoQuestions);
        }

        let enriched = self.resolver.enrich_all(raw_papers).await;
        let resolved = enriched.records.len();
        if resolved == 0 {
            return Err(PipelineError::NothingResolved {
                unresolved: enriched.unresolved,
            });
        }

        let table = PaperTable::from_records(enriched.records)?.deduplicate();
        let duplicates = resolved - table.len();

        let BatchOutcome {
            assessments,
            usage,
            failed,
            ..
        } = self
            .analyzer
            .batch_analyze(table.rows(), questions, &self.model_key)
            .await?;

        let scores = aggregate_scores(&assessments);
        let table = table.rank(&scores);

        let mut save_error = None;
        if let Some(path) = &self.table_path {
            match table.save(path) {
                Ok(()) => info!(path = %path.display(), rows = table.len(), "Ranked table saved"),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to save ranked table");
                    save_error = Some(e.to_string());
                }
            }
        }

        info!(
            resolved,
            unresolved = enriched.unresolved,
            duplicates,
            failed_assessments = failed,
            cost_usd = usage.estimated_cost_usd,
            "Run complete"
        );

        Ok(RunReport {
            table,
            usage,
            resolved,
            unresolved: enriched.unresolved,
            duplicates,
            failed_assessments: failed,
            save_error,
        })
    }
}
