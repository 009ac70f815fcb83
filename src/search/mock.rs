#![cfg(any(test, feature = "mock"))]

use std::collections::HashMap;
use std::sync::Mutex;

use super::error::{SearchError, SearchResult};
use super::model::{SearchHit, SearchQuery};
use super::SearchBackend;

/// Scripted search backend keyed by rendered query; records every call.
#[derive(Default)]
pub struct MockSearchBackend {
    responses: Mutex<HashMap<String, Vec<SearchHit>>>,
    failing: Mutex<Vec<String>>,
    calls: Mutex<Vec<SearchQuery>>,
}

impl MockSearchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `query` (matched on its `Display` form) with `hits`.
    pub fn with_response(self, query: &SearchQuery, hits: Vec<SearchHit>) -> Self {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .insert(query.to_string(), hits);
        self
    }

    /// Makes `query` fail with a transport-style error.
    pub fn with_failure(self, query: &SearchQuery) -> Self {
        self.failing
            .lock()
            .expect("mock lock poisoned")
            .push(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<SearchQuery> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock lock poisoned").len()
    }

    /// Builds a plausible hit for tests.
    pub fn hit(canonical_id: &str, title: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            authors: vec!["Doe, Jane".to_string()],
            canonical_id: canonical_id.to_string(),
            abstract_text: format!("Abstract of {title}."),
            categories: vec!["cs.LG".to_string()],
            pdf_url: format!("https://arxiv.org/pdf/{canonical_id}"),
            published: None,
        }
    }
}

impl SearchBackend for MockSearchBackend {
    async fn search(&self, query: &SearchQuery, max_results: usize) -> SearchResult<Vec<SearchHit>> {
        self.calls
            .lock()
            .map_err(|_| SearchError::Config("lock poisoned".to_string()))?
            .push(query.clone());

        let key = query.to_string();
        let fails = self
            .failing
            .lock()
            .map_err(|_| SearchError::Config("lock poisoned".to_string()))?
            .contains(&key);
        if fails {
            return Err(SearchError::Status {
                status: 503,
                preview: "service unavailable".to_string(),
            });
        }

        let mut hits = self
            .responses
            .lock()
            .map_err(|_| SearchError::Config("lock poisoned".to_string()))?
            .get(&key)
            .cloned()
            .unwrap_or_default();
        hits.truncate(max_results);
        Ok(hits)
    }
}
