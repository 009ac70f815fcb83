//! Relevance analysis: prompt, call, parse, account.
//!
//! [`RelevanceAnalyzer::analyze`] judges one paper against one question.
//! Provider unavailability, provider failures, and unparseable replies all
//! come back as failed [`RelevanceAssessment`]s; only a paper missing a
//! mandatory field or an unknown model key is an `Err`.

pub mod error;
pub mod parse;
pub mod prompt;
pub mod types;


pub use error::{AnalyzerError, AnalyzerResult};
pub use parse::{ParseFailure, ParsedResponse, parse_response, strip_code_fence};
pub use prompt::build_prompt;
pub use types::{
    AssessmentMap, BatchOutcome, RelevanceAssessment, UsageTotals, aggregate_scores, cost_of,
};

use tracing::{debug, info, warn};

use crate::constants::{RAW_RESPONSE_EXCERPT_CHARS, char_prefix};
use crate::models::{ModelInfo, ModelRegistry};
use crate::provider::{ProviderRegistry, TokenUsage};
use crate::store::PaperRecord;

/// Scores papers against research questions with an LLM judge.
#[derive(Debug, Clone)]
pub struct RelevanceAnalyzer {
    providers: ProviderRegistry,
}

impl RelevanceAnalyzer {
    pub fn new(providers: ProviderRegistry) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Judges `paper` against `question` with the model registered as `model_key`.
    pub async fn analyze(
        &self,
        paper: &PaperRecord,
        question: &str,
        model_key: &str,
    ) -> AnalyzerResult<RelevanceAssessment> {
        validate_paper(0, paper)?;
        let model = lookup_model(model_key)?;
        Ok(self.assess(paper, question, model).await)
    }

    /// Runs every paper × question pair in input order.
    ///
    /// All papers are validated before the first call is issued.
    pub async fn batch_analyze(
        &self,
        papers: &[PaperRecord],
        questions: &[String],
        model_key: &str,
    ) -> AnalyzerResult<BatchOutcome> {
        for (index, paper) in papers.iter().enumerate() {
            validate_paper(index, paper)?;
        }
        let model = lookup_model(model_key)?;

        info!(
            papers = papers.len(),
            questions = questions.len(),
            model = model.key,
            "Starting relevance batch"
        );

        let mut outcome = BatchOutcome::default();
        for paper in papers {
            for question in questions {
                let assessment = self.assess(paper, question, model).await;
                outcome.usage.record(&assessment.usage, &model.pricing);
                outcome.calls += 1;
                if assessment.error {
                    outcome.failed += 1;
                }
                outcome
                    .assessments
                    .entry(paper.canonical_id.clone())
                    .or_default()
                    .insert(question.clone(), assessment);
            }
        }

        info!(
            calls = outcome.calls,
            failed = outcome.failed,
            prompt_tokens = outcome.usage.total_prompt_tokens,
            completion_tokens = outcome.usage.total_completion_tokens,
            cost_usd = outcome.usage.estimated_cost_usd,
            "Relevance batch complete"
        );
        Ok(outcome)
    }

    async fn assess(
        &self,
        paper: &PaperRecord,
        question: &str,
        model: &ModelInfo,
    ) -> RelevanceAssessment {
        let paper_id = paper.canonical_id.as_str();

        let provider = match self.providers.resolve(model.family) {
            Ok(provider) => provider,
            Err(e) => {
                warn!(paper_id, model = model.key, error = %e, "Provider unavailable");
                return RelevanceAssessment::failed(
                    paper_id,
                    question,
                    format!("Provider unavailable: {e}"),
                    TokenUsage::default(),
                );
            }
        };

        let prompt = build_prompt(paper, question);
        let response = match provider
            .generate(&prompt, model.model_id, model.max_output_tokens)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(paper_id, model = model.key, error = %e, "Provider call failed");
                return RelevanceAssessment::failed(
                    paper_id,
                    question,
                    format!("Provider error: {e}"),
                    TokenUsage::default(),
                );
            }
        };

        match parse_response(&response.text) {
            Ok(parsed) => {
                debug!(paper_id, score = parsed.score, "Assessment parsed");
                RelevanceAssessment::scored(
                    paper_id,
                    question,
                    parsed.score,
                    parsed.explanation,
                    response.usage,
                )
            }
            Err(reason) => {
                let excerpt = char_prefix(&response.text, RAW_RESPONSE_EXCERPT_CHARS);
                warn!(paper_id, %reason, excerpt, "Unparseable model response");
                RelevanceAssessment::failed(
                    paper_id,
                    question,
                    format!("Failed to parse model response ({reason}). Raw response begins: {excerpt}"),
                    response.usage,
                )
            }
        }
    }
}

fn validate_paper(index: usize, paper: &PaperRecord) -> AnalyzerResult<()> {
    if !paper.has_canonical_id() {
        return Err(AnalyzerError::ContractViolation {
            index,
            field: "canonical_id",
        });
    }
    if paper.title.trim().is_empty() {
        return Err(AnalyzerError::ContractViolation {
            index,
            field: "title",
        });
    }
    Ok(())
}

fn lookup_model(model_key: &str) -> AnalyzerResult<&'static ModelInfo> {
    ModelRegistry::get(model_key).ok_or_else(|| AnalyzerError::UnsupportedModel {
        key: model_key.to_string(),
    })
}
