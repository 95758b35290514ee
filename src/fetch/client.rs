use tracing::{debug, warn};

use crate::constants::{FETCH_TIMEOUT, MAX_REDIRECTS};

use super::error::FetchError;
use super::source::PageSource;
use super::{EmptyReason, PageText};

/// Browser-like User-Agent; some sites reject default client identifiers.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Single-attempt HTTP page fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds a fetcher with the fixed timeout and the given (or default) User-Agent.
    pub fn new(user_agent: Option<&str>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FetchError::Client {
                reason: e.to_string(),
            })?;

        Ok(Self { client })
    }

    /// Fetches a URL and returns the raw body of a 2xx response.
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_send(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(FetchError::from_body)
    }
}

impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> PageText {
        match self.fetch_html(url).await {
            Ok(html) => {
                let page = PageText::from_html(&html);
                debug!(
                    url = %url,
                    html_len = html.len(),
                    text_len = page.as_text().map_or(0, str::len),
                    "Fetched page"
                );
                page
            }
            Err(err) => {
                warn!(url = %url, error = %err, "Page fetch failed, treating as empty");
                PageText::Empty(EmptyReason::Failed(err))
            }
        }
    }
}
