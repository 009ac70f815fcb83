//! Cross-cutting, shared constants.
//!
//! Values that more than one module must agree on live here. Module-local
//! tuning knobs stay next to the code that uses them.

/// Default arXiv Atom API endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://export.arxiv.org/api/query";

/// Default number of candidates requested per search strategy.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Default model registry key used for relevance scoring.
pub const DEFAULT_MODEL_KEY: &str = "gpt-4o-mini";

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Base delay before every throttled call.
pub const DEFAULT_THROTTLE_BASE_MS: u64 = 1_000;
/// Uniform jitter applied around the base delay (±).
pub const DEFAULT_THROTTLE_JITTER_MS: u64 = 200;
/// Minimum delay regardless of jitter.
pub const DEFAULT_THROTTLE_FLOOR_MS: u64 = 800;

/// Abstracts longer than this many characters are truncated in prompts.
pub const ABSTRACT_PROMPT_CHARS: usize = 2_000;

/// Characters of a malformed model response kept in diagnostics.
pub const RAW_RESPONSE_EXCERPT_CHARS: usize = 200;

/// Upper bound of the integer scale models are asked to score on.
pub const SCORE_SCALE_MAX: f64 = 10.0;

/// Characters of an unexpected HTTP body kept in search errors.
pub const BODY_PREVIEW_CHARS: usize = 200;

/// Tokens per unit of model pricing (prices are quoted per million tokens).
pub const TOKENS_PER_PRICE_UNIT: f64 = 1_000_000.0;

/// Title words ignored when building the author-anchored query.
pub const TITLE_STOP_WORDS: &[&str] = &[
    "a", "an", "the", "on", "of", "for", "and", "in", "to", "with",
];

/// Number of distinctive title words used by the author-anchored query.
pub const DISTINCTIVE_WORDS: usize = 2;

/// Returns at most `max_chars` characters of `text` (char-boundary safe).
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Collapses runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
