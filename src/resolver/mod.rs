//! Metadata resolution: noisy (title, authors) → canonical record.
//!
//! Strategies run in a fixed order and stop at the first non-empty result:
//!
//! 1. quoted title (phrase match)
//! 2. unquoted title
//! 3. first author's family name AND the first two distinctive title words
//!
//! Every search goes through the shared [`RateLimiter`]. When all strategies
//! come back empty the paper is unresolved ([`ResolveError::NoMatch`]), which
//! callers treat as "skip this paper", never as fatal.

pub mod error;
pub mod strategy;


pub use error::{ResolveError, ResolveResult};
pub use strategy::{distinctive_phrase, family_name, search_plan};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::constants::{DEFAULT_MAX_RESULTS, collapse_whitespace};
use crate::search::{SearchBackend, SearchHit};
use crate::store::{PaperRecord, RawPaperRecord};
use crate::throttle::RateLimiter;

/// Resolves citations against a [`SearchBackend`].
pub struct Resolver<S: SearchBackend> {
    backend: S,
    limiter: Arc<RateLimiter>,
    max_results: usize,
}

/// Result of enriching a batch of raw records.
#[derive(Debug, Clone, Default)]
pub struct EnrichOutcome {
    /// Successfully resolved records, in input order.
    pub records: Vec<PaperRecord>,
    /// Number of raw records with no match (or a failed search).
    pub unresolved: usize,
}

impl<S: SearchBackend> Resolver<S> {
    pub fn new(backend: S, limiter: Arc<RateLimiter>) -> Self {
        Self {
            backend,
            limiter,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Returns every candidate of the first strategy that produced any.
    pub async fn resolve_candidates(
        &self,
        title: &str,
        authors: &[String],
    ) -> ResolveResult<Vec<SearchHit>> {
        for query in search_plan(title, authors) {
            let hits = self
                .limiter
                .throttle(|| self.backend.search(&query, self.max_results))
                .await?;

            debug!(
                strategy = query.strategy(),
                query = %query,
                hits = hits.len(),
                "Resolver strategy finished"
            );

            if !hits.is_empty() {
                return Ok(hits);
            }
        }

        Err(ResolveError::NoMatch {
            title: title.to_string(),
        })
    }

    /// Returns the best candidate.
    pub async fn resolve(&self, title: &str, authors: &[String]) -> ResolveResult<SearchHit> {
        let hits = self.resolve_candidates(title, authors).await?;
        hits.into_iter().next().ok_or_else(|| ResolveError::NoMatch {
            title: title.to_string(),
        })
    }

    /// Resolves one raw record into an enriched [`PaperRecord`].
    pub async fn enrich(&self, raw: &RawPaperRecord) -> ResolveResult<PaperRecord> {
        let authors = raw.author_list();
        let hit = self.resolve(&raw.title, &authors).await?;
        Ok(PaperRecord::from_raw_and_hit(raw, hit))
    }

    /// Enriches every raw record, counting (not failing on) unresolved ones.
    pub async fn enrich_all(&self, raws: &[RawPaperRecord]) -> EnrichOutcome {
        let mut outcome = EnrichOutcome::default();

        for (index, raw) in raws.iter().enumerate() {
            match self.enrich(raw).await {
                Ok(record) => outcome.records.push(record),
                Err(ResolveError::NoMatch { .. }) => {
                    debug!(index, title = %collapse_whitespace(&raw.title), "No match found");
                    outcome.unresolved += 1;
                }
                Err(e) => {
                    warn!(index, error = %e, "Search failed; treating paper as unresolved");
                    outcome.unresolved += 1;
                }
            }
        }

        info!(
            total = raws.len(),
            resolved = outcome.records.len(),
            unresolved = outcome.unresolved,
            "Metadata resolution complete"
        );

        outcome
    }
}
