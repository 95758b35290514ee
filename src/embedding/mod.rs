//! Model backends behind two capability traits.
//!
//! - [`TextEmbedder`]: text to fixed-size vector ([`SentenceEmbedder`]).
//! - [`TextClassifier`]: text to top label + confidence ([`SequenceClassifier`]).
//!
//! Backends are loaded once and shared read-only through [`Backends`]. A missing
//! backend is represented by `None`, never by an error.

mod backends;
/// BERT-family encoder and classification heads.
pub mod bert;
/// Backend configuration.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Sentence embedder (mean-pooled encoder).
pub mod sentence;
/// Sequence classifier (sentiment / stance).
pub mod classifier;
#[cfg(any(test, feature = "mock"))]
mod stub;
/// Tokenizer loading helpers.
pub mod utils;


pub use backends::Backends;
pub use classifier::SequenceClassifier;
pub use config::{ClassifierConfig, EmbedderConfig};
pub use error::EmbeddingError;
pub use sentence::SentenceEmbedder;
#[cfg(any(test, feature = "mock"))]
pub use stub::{FailingBackend, FixedLabelClassifier, StubEmbedder};

/// Top label produced by a [`TextClassifier`].
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Label name as reported by the model (case preserved).
    pub label: String,
    /// Softmax probability of the label.
    pub confidence: f32,
}

/// Encodes text into a vector. Query and content must use the same implementation.
pub trait TextEmbedder: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Assigns a single label to text.
pub trait TextClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Classification, EmbeddingError>;
}
