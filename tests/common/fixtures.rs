//! Test fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use validity::{Backends, FixedLabelClassifier, HttpFetcher, StubEmbedder, UrlValidator};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const INFANT_TRAVEL_QUERY: &str =
    "I have just been on an international flight, can I come back home to hold my 1-month-old newborn?";

pub const INFANT_TRAVEL_PAGE: &str = r#"
<html>
  <head><title>Air travel with an infant</title><script>track()</script></head>
  <body>
    <nav><a href="/">Home</a></nav>
    <h1>Expert answers</h1>
    <p>Air travel with a newborn is generally safe for healthy infants.</p>
    <p>After an international flight, wash your hands before you hold your newborn.</p>
    <footer>Copyright</footer>
  </body>
</html>
"#;

pub const HEADINGS_ONLY_PAGE: &str =
    "<html><body><h1>Title</h1><h2>Subtitle</h2><ul><li>item</li></ul></body></html>";

/// Stub embedder plus a classifier fixed to `label`.
pub fn stub_backends(label: &str) -> Backends {
    Backends::new(
        Some(Arc::new(StubEmbedder::default())),
        Some(Arc::new(FixedLabelClassifier::new(label))),
    )
}

pub fn http_validator(backends: Backends) -> UrlValidator<HttpFetcher> {
    let fetcher = HttpFetcher::new(None).expect("client should build");
    UrlValidator::new(fetcher, backends)
}

/// Serves `body` with `status` at `route` on a fresh mock server.
pub async fn serve(route: &str, status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}
