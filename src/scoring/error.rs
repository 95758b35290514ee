use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("backend error: {0}")]
    Backend(#[from] EmbeddingError),

    #[error("{backend} backend unavailable")]
    Unavailable { backend: &'static str },

    #[error("content is empty")]
    EmptyContent,

    #[error("embedding dimension mismatch: query {query}, content {content}")]
    DimensionMismatch { query: usize, content: usize },
}

impl ScoringError {
    /// Returns `true` for the documented fallback conditions (as opposed to failures).
    pub fn is_expected_fallback(&self) -> bool {
        matches!(
            self,
            ScoringError::Unavailable { .. } | ScoringError::EmptyContent
        )
    }
}
