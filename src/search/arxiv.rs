//! arXiv Atom API client.

use std::time::Duration;

use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

use super::error::{SearchError, SearchResult};
use super::model::{SearchHit, SearchQuery};
use super::SearchBackend;
use crate::constants::{BODY_PREVIEW_CHARS, DEFAULT_SEARCH_URL, char_prefix, collapse_whitespace};

const USER_AGENT: &str = concat!("paperrank/", env!("CARGO_PKG_VERSION"));
const ERROR_ENTRY_MARKER: &str = "/api/errors";

#[derive(Clone, Debug)]
/// Relevance-sorted title/author search against the arXiv Atom API.
pub struct ArxivClient {
    http: Client,
    base: String,
}

impl ArxivClient {
    /// Creates a client for `base` (e.g. `https://export.arxiv.org/api/query`).
    pub fn new(base: impl Into<String>, timeout: Duration) -> SearchResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base: base.into(),
        })
    }

    /// Client for the public arXiv endpoint.
    pub fn public(timeout: Duration) -> SearchResult<Self> {
        Self::new(DEFAULT_SEARCH_URL, timeout)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Translates a neutral query into arXiv field syntax.
    pub fn render_query(query: &SearchQuery) -> String {
        match query {
            SearchQuery::Phrase(title) => format!("ti:\"{}\"", strip_quotes(title)),
            SearchQuery::Loose(title) => format!("ti:{}", strip_quotes(title)),
            SearchQuery::AuthorPhrase { author, phrase } => {
                format!("au:{} AND ti:\"{}\"", strip_quotes(author), strip_quotes(phrase))
            }
        }
    }
}

impl SearchBackend for ArxivClient {
    async fn search(&self, query: &SearchQuery, max_results: usize) -> SearchResult<Vec<SearchHit>> {
        let search_query = Self::render_query(query);
        debug!(strategy = query.strategy(), query = %search_query, max_results, "arXiv search");

        let resp = self
            .http
            .get(&self.base)
            .query(&[("search_query", search_query.as_str())])
            .query(&[("start", 0usize), ("max_results", max_results)])
            .query(&[("sortBy", "relevance"), ("sortOrder", "descending")])
            .header(ACCEPT, "application/atom+xml, application/xml;q=0.9, text/xml;q=0.8")
            .send()
            .await?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                preview: preview(&body),
            });
        }
        if !(content_type.contains("xml") || content_type.contains("atom")) {
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchError::UnexpectedContent {
                content_type,
                preview: preview(&body),
            });
        }

        let text = resp.text().await?;
        let mut hits = parse_atom_feed(&text)?;
        hits.truncate(max_results);
        Ok(hits)
    }
}

fn strip_quotes(text: &str) -> String {
    collapse_whitespace(&text.replace('"', " "))
}

fn preview(body: &str) -> String {
    let trimmed = body.trim();
    let prefix = char_prefix(trimmed, BODY_PREVIEW_CHARS);
    if prefix.len() < trimmed.len() {
        format!("{}…", prefix)
    } else {
        prefix.to_string()
    }
}

/// Strips the `http://arxiv.org/abs/` prefix, keeping old-style archive ids intact.
fn canonical_id_from_entry_id(entry_id: &str) -> String {
    let entry_id = entry_id.trim();
    match entry_id.split_once("/abs/") {
        Some((_, rest)) => rest.to_string(),
        None => entry_id.rsplit('/').next().unwrap_or(entry_id).to_string(),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    Id,
    Title,
    Summary,
    Published,
    AuthorName,
}

#[derive(Default)]
struct EntryBuilder {
    id: String,
    title: String,
    summary: String,
    published: String,
    authors: Vec<String>,
    categories: Vec<String>,
    pdf_url: Option<String>,
}

impl EntryBuilder {
    fn push_text(&mut self, target: TextTarget, text: &str) {
        match target {
            TextTarget::Id => self.id.push_str(text),
            TextTarget::Title => self.title.push_str(text),
            TextTarget::Summary => self.summary.push_str(text),
            TextTarget::Published => self.published.push_str(text),
            TextTarget::AuthorName => match self.authors.last_mut() {
                Some(name) => name.push_str(text),
                None => self.authors.push(text.to_string()),
            },
        }
    }

    fn element(&mut self, e: &BytesStart<'_>) {
        match e.local_name().as_ref() {
            b"category" => {
                if let Some(term) = attribute(e, b"term") {
                    self.categories.push(term);
                }
            }
            b"link" => {
                let is_pdf = attribute(e, b"title").is_some_and(|t| t.eq_ignore_ascii_case("pdf"))
                    || attribute(e, b"type").is_some_and(|t| t.contains("pdf"));
                if is_pdf
                    && self.pdf_url.is_none()
                    && let Some(href) = attribute(e, b"href")
                {
                    self.pdf_url = Some(href);
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> SearchHit {
        let published = DateTime::parse_from_rfc3339(self.published.trim())
            .ok()
            .map(|d| d.with_timezone(&Utc));
        SearchHit {
            title: collapse_whitespace(&self.title),
            authors: self
                .authors
                .iter()
                .map(|a| collapse_whitespace(a))
                .filter(|a| !a.is_empty())
                .collect(),
            canonical_id: canonical_id_from_entry_id(&self.id),
            abstract_text: collapse_whitespace(&self.summary),
            categories: self.categories,
            pdf_url: self.pdf_url.unwrap_or_default(),
            published,
        }
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Parses an arXiv Atom feed into hits, in feed order.
pub(crate) fn parse_atom_feed(xml: &str) -> SearchResult<Vec<SearchHit>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut hits = Vec::new();
    let mut entry: Option<EntryBuilder> = None;
    let mut target: Option<TextTarget> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if let Some(current) = entry.as_mut() {
                    target = match e.local_name().as_ref() {
                        b"id" => Some(TextTarget::Id),
                        b"title" => Some(TextTarget::Title),
                        b"summary" => Some(TextTarget::Summary),
                        b"published" => Some(TextTarget::Published),
                        b"name" => {
                            current.authors.push(String::new());
                            Some(TextTarget::AuthorName)
                        }
                        _ => {
                            current.element(&e);
                            None
                        }
                    };
                } else if e.local_name().as_ref() == b"entry" {
                    entry = Some(EntryBuilder::default());
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(current) = entry.as_mut() {
                    current.element(&e);
                }
            }
            Ok(Event::Text(t)) => {
                if let (Some(current), Some(tgt)) = (entry.as_mut(), target) {
                    let text = t
                        .unescape()
                        .map_err(|e| SearchError::Parse(e.to_string()))?;
                    current.push_text(tgt, &text);
                }
            }
            Ok(Event::CData(c)) => {
                if let (Some(current), Some(tgt)) = (entry.as_mut(), target) {
                    current.push_text(tgt, &String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"entry" {
                    if let Some(done) = entry.take() {
                        if done.id.contains(ERROR_ENTRY_MARKER) {
                            return Err(SearchError::Parse(format!(
                                "arXiv API error: {}",
                                collapse_whitespace(&done.summary)
                            )));
                        }
                        hits.push(done.finish());
                    }
                }
                target = None;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SearchError::Parse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(hits)
}
