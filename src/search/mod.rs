//! External bibliographic search service.
//!
//! [`SearchBackend`] is the boundary the resolver talks to. [`ArxivClient`]
//! is the production implementation (arXiv Atom API); [`MockSearchBackend`]
//! scripts responses for tests.

pub mod arxiv;
pub mod error;
pub mod mock;
pub mod model;

#[cfg(test)]
mod tests;

pub use arxiv::ArxivClient;
pub use error::{SearchError, SearchResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSearchBackend;
pub use model::{SearchHit, SearchQuery};

/// A ranked title/author search over an external bibliographic index.
pub trait SearchBackend: Send + Sync {
    /// Runs `query` and returns at most `max_results` hits, best first.
    fn search(
        &self,
        query: &SearchQuery,
        max_results: usize,
    ) -> impl std::future::Future<Output = SearchResult<Vec<SearchHit>>> + Send;
}
