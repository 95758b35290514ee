use super::PageText;

/// Anything that can turn a URL into page text.
pub trait PageSource: Send + Sync {
    /// Retrieves the page once. Failures are encoded in the returned [`PageText`].
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = PageText> + Send;
}

#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone)]
enum StaticPage {
    Html(String),
    Status(u16),
    Unreachable,
}

/// In-memory page source serving canned responses.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default, Clone)]
pub struct StaticPages {
    pages: std::sync::Arc<std::sync::RwLock<std::collections::HashMap<String, StaticPage>>>,
    fetches: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

#[cfg(any(test, feature = "mock"))]
impl StaticPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `html` with a 200 status for `url`.
    pub fn insert_html(&self, url: &str, html: &str) {
        self.insert(url, StaticPage::Html(html.to_string()));
    }

    /// Answers `url` with a non-success status.
    pub fn insert_status(&self, url: &str, status: u16) {
        self.insert(url, StaticPage::Status(status));
    }

    /// Simulates a connection error for `url`.
    pub fn insert_unreachable(&self, url: &str) {
        self.insert(url, StaticPage::Unreachable);
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn insert(&self, url: &str, page: StaticPage) {
        if let Ok(mut pages) = self.pages.write() {
            pages.insert(url.to_string(), page);
        }
    }
}

#[cfg(any(test, feature = "mock"))]
impl PageSource for StaticPages {
    async fn fetch(&self, url: &str) -> PageText {
        use super::{EmptyReason, FetchError};

        self.fetches
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        let page = self
            .pages
            .read()
            .ok()
            .and_then(|pages| pages.get(url).cloned());

        match page {
            Some(StaticPage::Html(html)) => PageText::from_html(&html),
            Some(StaticPage::Status(status)) => {
                PageText::Empty(EmptyReason::Failed(FetchError::Status { status }))
            }
            Some(StaticPage::Unreachable) | None => {
                PageText::Empty(EmptyReason::Failed(FetchError::Request {
                    reason: format!("connection refused: {}", url),
                }))
            }
        }
    }
}
