//! JSON input document for a run.

use std::path::Path;

use serde::Deserialize;

use super::error::{PipelineError, PipelineResult};
use crate::store::RawPaperRecord;

/// `{"questions": [...], "papers": [...]}`
#[derive(Debug, Clone, Deserialize)]
pub struct RunInput {
    pub questions: Vec<String>,
    #[serde(default)]
    pub papers: Vec<RawPaperRecord>,
}

impl RunInput {
    /// Parses and normalizes a document. Blank questions are dropped; at least
    /// one must remain.
    pub fn from_json(text: &str) -> PipelineResult<Self> {
        let mut input: RunInput = serde_json::from_str(text)?;
        input.questions = input
            .questions
            .into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();
        if input.questions.is_empty() {
            return Err(PipelineError::NoQuestions);
        }
        Ok(input)
    }

    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
