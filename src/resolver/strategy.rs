use crate::constants::{DISTINCTIVE_WORDS, TITLE_STOP_WORDS};
use crate::search::SearchQuery;

/// Text before the first comma of the first author ("Vaswani, Ashish" → "Vaswani").
pub fn family_name(authors: &[String]) -> Option<String> {
    let first = authors.first()?;
    let name = first.split(',').next().unwrap_or(first).trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// First distinctive title words: punctuation stripped, stop words skipped.
pub fn distinctive_phrase(title: &str) -> Option<String> {
    let words: Vec<String> = title
        .split_whitespace()
        .map(|word| word.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|word| !word.is_empty())
        .filter(|word| !TITLE_STOP_WORDS.contains(&word.to_lowercase().as_str()))
        .take(DISTINCTIVE_WORDS)
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// The ordered queries for one citation. The author-anchored query is omitted
/// when there is no usable author or no distinctive title word.
pub fn search_plan(title: &str, authors: &[String]) -> Vec<SearchQuery> {
    let title = title.trim();
    let mut plan = vec![
        SearchQuery::Phrase(title.to_string()),
        SearchQuery::Loose(title.to_string()),
    ];

    if let Some(author) = family_name(authors)
        && let Some(phrase) = distinctive_phrase(title)
    {
        plan.push(SearchQuery::AuthorPhrase { author, phrase });
    }

    plan
}
