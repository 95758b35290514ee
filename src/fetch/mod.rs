//! Page retrieval and paragraph text extraction.
//!
//! A fetch never fails from the caller's point of view: every outcome is a [`PageText`],
//! either usable text or an explicit [`EmptyReason`].
//!
//! - [`HttpFetcher`] performs one GET with a fixed timeout and browser User-Agent.
//! - [`extract_paragraph_text`] keeps only the text of `<p>` elements.
//! - [`StaticPages`] serves canned HTML for tests (behind the `mock` feature).

pub mod client;
pub mod error;
pub mod extract;
mod source;

#[cfg(test)]
mod tests;

pub use client::{DEFAULT_USER_AGENT, HttpFetcher};
pub use error::FetchError;
pub use extract::extract_paragraph_text;
#[cfg(any(test, feature = "mock"))]
pub use source::StaticPages;
pub use source::PageSource;

/// Why a fetch produced no usable text.
#[derive(Debug)]
pub enum EmptyReason {
    /// Network error, timeout, invalid URL or non-success status.
    Failed(FetchError),
    /// The page loaded but has no non-empty paragraph text.
    NoParagraphs,
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyReason::Failed(err) => write!(f, "fetch failed: {}", err),
            EmptyReason::NoParagraphs => write!(f, "no paragraph text"),
        }
    }
}

/// Outcome of fetching one page.
#[derive(Debug)]
pub enum PageText {
    /// Non-empty paragraph text.
    Text(String),
    /// Nothing usable; see the reason.
    Empty(EmptyReason),
}

impl PageText {
    /// Builds a [`PageText`] from a raw HTML body.
    pub fn from_html(html: &str) -> Self {
        let text = extract_paragraph_text(html);
        if text.is_empty() {
            PageText::Empty(EmptyReason::NoParagraphs)
        } else {
            PageText::Text(text)
        }
    }

    /// Returns the text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PageText::Text(text) => Some(text),
            PageText::Empty(_) => None,
        }
    }

    /// Returns `true` if no usable text was retrieved.
    pub fn is_empty(&self) -> bool {
        matches!(self, PageText::Empty(_))
    }

    /// Collapses the outcome to plain text (empty on any failure).
    pub fn into_text(self) -> String {
        match self {
            PageText::Text(text) => text,
            PageText::Empty(_) => String::new(),
        }
    }
}
