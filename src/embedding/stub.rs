//! Deterministic stand-ins for the model backends.

use std::hash::{DefaultHasher, Hash, Hasher};

use tracing::debug;

use super::error::EmbeddingError;
use super::sentence::normalize;
use super::{Classification, TextClassifier, TextEmbedder};

/// Default stub embedding dimension.
pub const STUB_EMBEDDING_DIM: usize = 384;

/// Feature-hashing embedder: each lowercase word bumps one signed bucket.
///
/// Identical text always yields identical vectors, and texts sharing words have a
/// positive cosine similarity, which is enough to exercise the relevance path.
#[derive(Debug, Clone)]
pub struct StubEmbedder {
    dim: usize,
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new(STUB_EMBEDDING_DIM)
    }
}

impl StubEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }
}

impl TextEmbedder for StubEmbedder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        debug!(text_len = text.len(), "Generating stub embedding");

        let mut embedding = vec![0.0f32; self.dim];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            let hash = hasher.finish();

            let bucket = (hash % self.dim as u64) as usize;
            let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }

        Ok(normalize(embedding))
    }
}

/// Classifier that always answers with the same label.
#[derive(Debug, Clone)]
pub struct FixedLabelClassifier {
    label: String,
    confidence: f32,
}

impl FixedLabelClassifier {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            confidence: 1.0,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }
}

impl TextClassifier for FixedLabelClassifier {
    fn classify(&self, _text: &str) -> Result<Classification, EmbeddingError> {
        Ok(Classification {
            label: self.label.clone(),
            confidence: self.confidence,
        })
    }
}

/// Backend whose every inference call fails.
#[derive(Debug, Clone, Default)]
pub struct FailingBackend;

impl TextEmbedder for FailingBackend {
    fn encode(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::InferenceFailed {
            reason: "stub failure".to_string(),
        })
    }
}

impl TextClassifier for FailingBackend {
    fn classify(&self, _text: &str) -> Result<Classification, EmbeddingError> {
        Err(EmbeddingError::InferenceFailed {
            reason: "stub failure".to_string(),
        })
    }
}
