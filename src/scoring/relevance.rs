use std::sync::Arc;

use tracing::{debug, warn};

use crate::constants::{RELEVANCE_FALLBACK, RELEVANCE_SCALE};
use crate::embedding::TextEmbedder;

use super::cosine_similarity;
use super::error::ScoringError;

/// Semantic relevance of page content to a query, on a nominal 0-100 scale.
#[derive(Clone, Default)]
pub struct RelevanceScorer {
    embedder: Option<Arc<dyn TextEmbedder>>,
}

impl std::fmt::Debug for RelevanceScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelevanceScorer")
            .field("available", &self.is_available())
            .finish()
    }
}

impl RelevanceScorer {
    pub fn new(embedder: Option<Arc<dyn TextEmbedder>>) -> Self {
        Self { embedder }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.embedder.is_some()
    }

    /// Cosine similarity of the two embeddings times 100, truncated toward zero.
    ///
    /// The result is not clamped: a negative cosine gives a negative score.
    pub fn try_relevance(&self, query: &str, content: &str) -> Result<i32, ScoringError> {
        if content.trim().is_empty() {
            return Err(ScoringError::EmptyContent);
        }
        let embedder = self
            .embedder
            .as_ref()
            .ok_or(ScoringError::Unavailable {
                backend: "embedding",
            })?;

        let query_vec = embedder.encode(query)?;
        let content_vec = embedder.encode(content)?;
        if query_vec.len() != content_vec.len() {
            return Err(ScoringError::DimensionMismatch {
                query: query_vec.len(),
                content: content_vec.len(),
            });
        }

        let similarity = cosine_similarity(&query_vec, &content_vec);
        let score = scale_similarity(similarity);

        debug!(
            query_len = query.len(),
            content_len = content.len(),
            similarity,
            score,
            "Computed relevance"
        );

        Ok(score)
    }

    /// Like [`try_relevance`](Self::try_relevance), with every error mapped to `0`.
    pub fn relevance(&self, query: &str, content: &str) -> i32 {
        match self.try_relevance(query, content) {
            Ok(score) => score,
            Err(e) if e.is_expected_fallback() => {
                debug!(reason = %e, "Relevance fallback");
                RELEVANCE_FALLBACK
            }
            Err(e) => {
                warn!(error = %e, "Relevance scoring failed, using fallback");
                RELEVANCE_FALLBACK
            }
        }
    }
}

/// Scales in f64 so f32 rounding cannot push a value like 56.99999 up to 57 before truncation.
pub(crate) fn scale_similarity(similarity: f32) -> i32 {
    (f64::from(similarity) * RELEVANCE_SCALE).trunc() as i32
}
