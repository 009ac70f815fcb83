//! Prompt construction.

use crate::constants::{ABSTRACT_PROMPT_CHARS, char_prefix};
use crate::store::PaperRecord;

const TRUNCATION_MARKER: &str = "...";

/// Abstract cut to [`ABSTRACT_PROMPT_CHARS`] characters, with a marker when cut.
pub fn truncate_abstract(text: &str) -> String {
    let prefix = char_prefix(text, ABSTRACT_PROMPT_CHARS);
    if prefix.len() < text.len() {
        format!("{prefix}{TRUNCATION_MARKER}")
    } else {
        text.to_string()
    }
}

/// Builds the user prompt for one (paper, question) pair.
pub fn build_prompt(paper: &PaperRecord, question: &str) -> String {
    let categories = if paper.categories.is_empty() {
        "n/a".to_string()
    } else {
        paper.categories.join(", ")
    };
    let abstract_text = if paper.abstract_text.trim().is_empty() {
        "n/a".to_string()
    } else {
        truncate_abstract(&paper.abstract_text)
    };

    format!(
        "Research question:\n{question}\n\n\
         Paper:\n\
         Title: {title}\n\
         Authors: {authors}\n\
         Categories: {categories}\n\
         Abstract: {abstract_text}\n\n\
         Task: decide whether this paper bears on the research question above. \
         Consider its topic, methods and findings, and how directly they help answer the question.\n\n\
         Respond in exactly this format and nothing else:\n\
         <explanation>Two or three sentences justifying the score.</explanation>\n\
         <score>X</score>\n\
         where X is an integer from 0 (unrelated) to 10 (directly answers the question).",
        title = paper.title,
        authors = paper.authors,
    )
}
