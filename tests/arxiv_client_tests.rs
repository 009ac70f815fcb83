//! `ArxivClient` against a local stub of the Atom API.

mod common;

use std::time::Duration;

use paperrank::{ArxivClient, SearchBackend, SearchError, SearchQuery};

use common::{ATTENTION_FEED, EMPTY_FEED, StubReply, spawn_stub_server};

fn client(url: &str) -> ArxivClient {
    ArxivClient::new(url, Duration::from_secs(5)).expect("client builds")
}

#[tokio::test]
async fn test_search_parses_feed() {
    let (url, seen) = spawn_stub_server(StubReply::atom(ATTENTION_FEED)).await;

    let hits = client(&url)
        .search(&SearchQuery::Phrase("Attention is All You Need".into()), 5)
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    let hit = &hits[0];
    assert_eq!(hit.canonical_id, "1706.03762v7");
    assert_eq!(hit.title, "Attention Is All You Need");
    assert_eq!(hit.authors, vec!["Ashish Vaswani", "Noam Shazeer"]);
    assert_eq!(hit.categories, vec!["cs.CL", "cs.LG"]);
    assert_eq!(hit.pdf_url, "http://arxiv.org/pdf/1706.03762v7");
    assert!(hit.abstract_text.starts_with("The dominant sequence transduction"));
    assert!(hit.published.is_some());

    let requests = seen.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let line = &requests[0];
    assert!(line.starts_with("GET /api/query?"));
    assert!(line.contains("search_query=ti%3A%22Attention+is+All+You+Need%22"));
    assert!(line.contains("max_results=5"));
    assert!(line.contains("sortBy=relevance"));
    assert!(line.contains("sortOrder=descending"));
}

#[tokio::test]
async fn test_search_empty_feed() {
    let (url, _) = spawn_stub_server(StubReply::atom(EMPTY_FEED)).await;
    let hits = client(&url)
        .search(&SearchQuery::Loose("nothing here".into()), 5)
        .await
        .unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_search_error_status_carries_preview() {
    let (url, _) = spawn_stub_server(StubReply {
        status: 503,
        content_type: "text/plain",
        body: "x".repeat(1_000),
    })
    .await;

    let err = client(&url)
        .search(&SearchQuery::Loose("t".into()), 5)
        .await
        .unwrap_err();
    match err {
        SearchError::Status { status, preview } => {
            assert_eq!(status, 503);
            assert!(preview.chars().count() <= 201);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_rejects_html() {
    let (url, _) = spawn_stub_server(StubReply {
        status: 200,
        content_type: "text/html",
        body: "<html>maintenance</html>".to_string(),
    })
    .await;

    let err = client(&url)
        .search(&SearchQuery::Loose("t".into()), 5)
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::UnexpectedContent { .. }));
}
