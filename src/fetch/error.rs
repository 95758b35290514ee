use thiserror::Error;

/// Reasons a page could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request timed out")]
    Timeout,

    #[error("request failed: {reason}")]
    Request { reason: String },

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("failed to read response body: {reason}")]
    Body { reason: String },

    #[error("failed to build HTTP client: {reason}")]
    Client { reason: String },
}

impl FetchError {
    pub(crate) fn from_send(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_builder() {
            FetchError::InvalidUrl {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            FetchError::Request {
                reason: err.to_string(),
            }
        }
    }

    pub(crate) fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Body {
                reason: err.to_string(),
            }
        }
    }
}
