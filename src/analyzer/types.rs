use std::collections::HashMap;

use crate::constants::TOKENS_PER_PRICE_UNIT;
use crate::models::Pricing;
use crate::provider::TokenUsage;

/// Outcome of judging one paper against one question. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct RelevanceAssessment {
    pub paper_id: String,
    pub question: String,
    /// Always within `[0, 1]`; `0.0` for failed assessments.
    pub relevance_score: f64,
    pub explanation: String,
    /// True when the provider was unavailable, failed, or the reply was unparseable.
    pub error: bool,
    pub usage: TokenUsage,
}

impl RelevanceAssessment {
    pub fn scored(
        paper_id: &str,
        question: &str,
        relevance_score: f64,
        explanation: String,
        usage: TokenUsage,
    ) -> Self {
        Self {
            paper_id: paper_id.to_string(),
            question: question.to_string(),
            relevance_score,
            explanation,
            error: false,
            usage,
        }
    }

    pub fn failed(paper_id: &str, question: &str, explanation: String, usage: TokenUsage) -> Self {
        Self {
            paper_id: paper_id.to_string(),
            question: question.to_string(),
            relevance_score: 0.0,
            explanation,
            error: true,
            usage,
        }
    }
}

/// Token and cost totals for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UsageTotals {
    pub total_prompt_tokens: u64,
    pub total_completion_tokens: u64,
    pub total_tokens: u64,
    pub estimated_cost_usd: f64,
}

impl UsageTotals {
    /// Adds one call's usage. Absent counts contribute zero.
    pub fn record(&mut self, usage: &TokenUsage, pricing: &Pricing) {
        let prompt = usage.prompt_tokens.unwrap_or(0);
        let completion = usage.completion_tokens.unwrap_or(0);
        self.total_prompt_tokens += prompt;
        self.total_completion_tokens += completion;
        self.total_tokens += usage.total_tokens.unwrap_or(prompt + completion);
        self.estimated_cost_usd += cost_of(prompt, completion, pricing);
    }

    /// Folds another run's totals into this one.
    pub fn merge(&mut self, other: &UsageTotals) {
        self.total_prompt_tokens += other.total_prompt_tokens;
        self.total_completion_tokens += other.total_completion_tokens;
        self.total_tokens += other.total_tokens;
        self.estimated_cost_usd += other.estimated_cost_usd;
    }
}

/// `prompt * input_price / 1e6 + completion * output_price / 1e6`.
pub fn cost_of(prompt_tokens: u64, completion_tokens: u64, pricing: &Pricing) -> f64 {
    prompt_tokens as f64 * pricing.input_per_million / TOKENS_PER_PRICE_UNIT
        + completion_tokens as f64 * pricing.output_per_million / TOKENS_PER_PRICE_UNIT
}

/// canonical_id → question → assessment.
pub type AssessmentMap = HashMap<String, HashMap<String, RelevanceAssessment>>;

/// Result of [`batch_analyze`](super::RelevanceAnalyzer::batch_analyze).
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub assessments: AssessmentMap,
    pub usage: UsageTotals,
    /// Provider calls issued (papers × questions, duplicates included).
    pub calls: usize,
    /// Assessments that came back with `error == true`.
    pub failed: usize,
}

impl BatchOutcome {
    pub fn get(&self, paper_id: &str, question: &str) -> Option<&RelevanceAssessment> {
        self.assessments.get(paper_id)?.get(question)
    }
}

/// Mean relevance per paper. Failed assessments count as `0.0`; papers with
/// no assessments are omitted.
pub fn aggregate_scores(assessments: &AssessmentMap) -> HashMap<String, f64> {
    assessments
        .iter()
        .filter(|(_, by_question)| !by_question.is_empty())
        .map(|(paper_id, by_question)| {
            let sum: f64 = by_question.values().map(|a| a.relevance_score).sum();
            (paper_id.clone(), sum / by_question.len() as f64)
        })
        .collect()
}
