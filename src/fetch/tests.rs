use super::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE: &str = r#"
<html>
  <head><title>Air travel with an infant</title></head>
  <body>
    <h1>Expert answers</h1>
    <p>Most healthy newborns can travel by air.</p>
    <p>Wash your hands before holding the baby.</p>
  </body>
</html>
"#;

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(None).expect("client should build")
}

#[tokio::test]
async fn test_fetch_extracts_paragraphs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetcher().fetch(&format!("{}/article", server.uri())).await;

    assert_eq!(
        page.as_text(),
        Some("Most healthy newborns can travel by air. Wash your hands before holding the baby.")
    );
}

#[tokio::test]
async fn test_fetch_sends_browser_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>ok</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetcher().fetch(&server.uri()).await;

    assert_eq!(page.as_text(), Some("ok"));
}

#[tokio::test]
async fn test_fetch_custom_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "ValidityBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>ok</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(Some("ValidityBot/1.0")).expect("client should build");
    let page = fetcher.fetch(&server.uri()).await;

    assert!(!page.is_empty());
}

#[tokio::test]
async fn test_fetch_non_success_status_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<p>Not found</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetcher().fetch(&server.uri()).await;

    assert!(matches!(
        page,
        PageText::Empty(EmptyReason::Failed(FetchError::Status { status: 404 }))
    ));
}

#[tokio::test]
async fn test_fetch_server_error_is_single_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let page = fetcher().fetch(&server.uri()).await;

    assert!(page.is_empty());
    server.verify().await;
}

#[tokio::test]
async fn test_fetch_page_without_paragraphs() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><h1>Title</h1></body></html>"),
        )
        .mount(&server)
        .await;

    let page = fetcher().fetch(&server.uri()).await;

    assert!(matches!(page, PageText::Empty(EmptyReason::NoParagraphs)));
}

#[tokio::test]
async fn test_fetch_unreachable_host_is_empty() {
    let page = fetcher().fetch("http://127.0.0.1:1/unreachable").await;

    assert!(matches!(page, PageText::Empty(EmptyReason::Failed(_))));
    assert_eq!(page.into_text(), "");
}

#[tokio::test]
async fn test_fetch_invalid_url_is_empty() {
    let page = fetcher().fetch("not a url").await;

    assert!(matches!(page, PageText::Empty(EmptyReason::Failed(_))));
}

#[tokio::test]
async fn test_static_pages_serves_canned_html() {
    let pages = StaticPages::new();
    pages.insert_html("https://example.com/a", "<p>Alpha</p><p>Beta</p>");
    pages.insert_status("https://example.com/b", 500);
    pages.insert_unreachable("https://example.com/c");

    assert_eq!(
        pages.fetch("https://example.com/a").await.as_text(),
        Some("Alpha Beta")
    );
    assert!(matches!(
        pages.fetch("https://example.com/b").await,
        PageText::Empty(EmptyReason::Failed(FetchError::Status { status: 500 }))
    ));
    assert!(pages.fetch("https://example.com/c").await.is_empty());
    assert!(pages.fetch("https://example.com/unknown").await.is_empty());
    assert_eq!(pages.fetch_count(), 4);
}

#[test]
fn test_page_text_from_html() {
    assert!(matches!(
        PageText::from_html("<div>nothing</div>"),
        PageText::Empty(EmptyReason::NoParagraphs)
    ));
    assert_eq!(PageText::from_html("<p>x</p>").into_text(), "x");
}

#[test]
fn test_empty_reason_display() {
    let reason = EmptyReason::Failed(FetchError::Status { status: 404 });
    assert_eq!(reason.to_string(), "fetch failed: unexpected HTTP status 404");
    assert_eq!(EmptyReason::NoParagraphs.to_string(), "no paragraph text");
}
