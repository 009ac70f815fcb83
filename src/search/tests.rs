use super::arxiv::parse_atom_feed;
use super::*;

const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query: search_query=ti:"Attention Is All You Need"</title>
  <id>http://arxiv.org/api/abc</id>
  <entry>
    <id>http://arxiv.org/abs/1706.03762v7</id>
    <updated>2023-08-02T00:41:18Z</updated>
    <published>2017-06-12T17:57:34Z</published>
    <title>Attention Is All
      You Need</title>
    <summary>  The dominant sequence transduction models
  are based on complex recurrent &amp; convolutional networks.</summary>
    <author><name>Ashish Vaswani</name></author>
    <author><name>Noam Shazeer</name></author>
    <link href="http://arxiv.org/abs/1706.03762v7" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/1706.03762v7" rel="related" type="application/pdf"/>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/hep-th/9901001v1</id>
    <published>1999-01-01T00:00:00Z</published>
    <title>Old style identifier</title>
    <summary>Legacy.</summary>
    <author><name>Someone Else</name></author>
  </entry>
</feed>
"#;

const ERROR_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/api/errors#incorrect_id_format_for_1234</id>
    <title>Error</title>
    <summary>incorrect id format for 1234</summary>
  </entry>
</feed>
"#;

#[test]
fn test_parse_feed_extracts_hits() {
    let hits = parse_atom_feed(SAMPLE_FEED).expect("parse");
    assert_eq!(hits.len(), 2);

    let hit = &hits[0];
    assert_eq!(hit.canonical_id, "1706.03762v7");
    assert_eq!(hit.title, "Attention Is All You Need");
    assert_eq!(hit.authors, vec!["Ashish Vaswani", "Noam Shazeer"]);
    assert_eq!(
        hit.abstract_text,
        "The dominant sequence transduction models are based on complex recurrent & convolutional networks."
    );
    assert_eq!(hit.categories, vec!["cs.CL", "cs.LG"]);
    assert_eq!(hit.pdf_url, "http://arxiv.org/pdf/1706.03762v7");
    assert_eq!(
        hit.published.map(|p| p.to_rfc3339()),
        Some("2017-06-12T17:57:34+00:00".to_string())
    );
}

#[test]
fn test_parse_feed_keeps_archive_prefix_in_old_ids() {
    let hits = parse_atom_feed(SAMPLE_FEED).expect("parse");
    assert_eq!(hits[1].canonical_id, "hep-th/9901001v1");
    assert_eq!(hits[1].pdf_url, "");
    assert!(hits[1].categories.is_empty());
}

#[test]
fn test_parse_empty_feed() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>empty</title></feed>"#;
    assert!(parse_atom_feed(xml).expect("parse").is_empty());
}

#[test]
fn test_parse_error_entry_is_reported() {
    let err = parse_atom_feed(ERROR_FEED).unwrap_err();
    assert!(matches!(err, SearchError::Parse(ref msg) if msg.contains("incorrect id format")));
}

#[test]
fn test_query_display_uses_neutral_syntax() {
    let phrase = SearchQuery::Phrase("Attention is All You Need".to_string());
    let loose = SearchQuery::Loose("Attention is All You Need".to_string());
    let author = SearchQuery::AuthorPhrase {
        author: "Vaswani".to_string(),
        phrase: "Attention All".to_string(),
    };

    assert_eq!(phrase.to_string(), "\"Attention is All You Need\"");
    assert_eq!(loose.to_string(), "Attention is All You Need");
    assert_eq!(author.to_string(), "author:Vaswani AND \"Attention All\"");
}

#[test]
fn test_render_query_uses_arxiv_fields() {
    let phrase = SearchQuery::Phrase("Deep \"Residual\" Learning".to_string());
    let author = SearchQuery::AuthorPhrase {
        author: "He".to_string(),
        phrase: "Deep Residual".to_string(),
    };

    assert_eq!(ArxivClient::render_query(&phrase), "ti:\"Deep Residual Learning\"");
    assert_eq!(
        ArxivClient::render_query(&SearchQuery::Loose("Deep Residual".to_string())),
        "ti:Deep Residual"
    );
    assert_eq!(ArxivClient::render_query(&author), "au:He AND ti:\"Deep Residual\"");
}

#[tokio::test]
async fn test_mock_backend_scripts_and_records() {
    let query = SearchQuery::Phrase("X".to_string());
    let backend = MockSearchBackend::new().with_response(
        &query,
        vec![MockSearchBackend::hit("1", "X"), MockSearchBackend::hit("2", "X2")],
    );

    let hits = backend.search(&query, 1).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].canonical_id, "1");

    let none = backend
        .search(&SearchQuery::Loose("X".to_string()), 5)
        .await
        .unwrap();
    assert!(none.is_empty());
    assert_eq!(backend.call_count(), 2);
}
