//! Tolerant extraction of `<explanation>` / `<score>` blocks from model text.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::constants::SCORE_SCALE_MAX;

static EXPLANATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<explanation>\s*(.*?)\s*</explanation>").expect("valid explanation regex")
});

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<score>\s*(.*?)\s*</score>").expect("valid score regex"));

/// Successfully parsed response.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub explanation: String,
    /// Normalized to `[0, 1]`.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseFailure {
    #[error("no <explanation> block")]
    MissingExplanation,
    #[error("no <score> block")]
    MissingScore,
    #[error("score '{0}' is not a number")]
    NonNumeric(String),
    #[error("score '{0}' is not finite")]
    NonFinite(String),
}

/// Removes a surrounding Markdown code fence, if any.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. ```xml) on the opening line.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parses a response into an explanation and a normalized score.
///
/// Finite scores outside `[0, 10]` are clamped.
pub fn parse_response(text: &str) -> Result<ParsedResponse, ParseFailure> {
    let body = strip_code_fence(text);

    let explanation = EXPLANATION_RE
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(ParseFailure::MissingExplanation)?;

    let raw_score = SCORE_RE
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or(ParseFailure::MissingScore)?;

    let value: f64 = raw_score
        .parse()
        .map_err(|_| ParseFailure::NonNumeric(raw_score.to_string()))?;
    if !value.is_finite() {
        return Err(ParseFailure::NonFinite(raw_score.to_string()));
    }

    let clamped = value.clamp(0.0, SCORE_SCALE_MAX);
    if clamped != value {
        warn!(raw = value, clamped, "Score outside 0-10 clamped");
    }

    Ok(ParsedResponse {
        explanation,
        score: clamped / SCORE_SCALE_MAX,
    })
}
