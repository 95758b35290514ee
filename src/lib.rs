//! URL validity scoring library (used by the `validity` binary and integration tests).
//!
//! Scores how well a web page answers a natural-language query. The score combines two
//! independent signals computed from the page's paragraph text:
//!
//! - **relevance**: cosine similarity of query and content embeddings, times 100
//! - **neutrality**: a three-bucket sentiment proxy (30 / 50 / 100)
//!
//! `final = 0.5 * relevance + 0.5 * neutrality`. When the page cannot be fetched, has no
//! paragraph text, or no model backend is available, the result is the fixed degraded
//! triple `{relevance: 0, neutrality: 50, final: 25.0}`.
//!
//! ## Modules
//! - [`fetch`]: page retrieval and paragraph extraction
//! - [`embedding`]: model backends behind [`TextEmbedder`] / [`TextClassifier`]
//! - [`scoring`]: [`RelevanceScorer`], [`NeutralityScorer`]
//! - [`validator`]: [`UrlValidator`], the aggregating entry point
//! - [`dataset`]: batch scoring and CSV persistence
//!
//! ## Test/Mock Support
//! [`StaticPages`] and the stub backends are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod dataset;
pub mod embedding;
pub mod fetch;
pub mod scoring;
pub mod validator;

pub use config::{Config, ConfigError};
pub use dataset::{AssembleOptions, DatasetError, DatasetRow, PromptUrl};
#[cfg(any(test, feature = "mock"))]
pub use embedding::{FailingBackend, FixedLabelClassifier, StubEmbedder};
pub use embedding::{
    Backends, Classification, ClassifierConfig, EmbedderConfig, EmbeddingError,
    SentenceEmbedder, SequenceClassifier, TextClassifier, TextEmbedder,
};
#[cfg(any(test, feature = "mock"))]
pub use fetch::StaticPages;
pub use fetch::{EmptyReason, FetchError, HttpFetcher, PageSource, PageText};
pub use scoring::{NeutralityBucket, NeutralityScorer, RelevanceScorer, ScoringError};
pub use validator::{
    DegradedReason, Outcome, Query, QueryError, ScoreComponents, UrlValidator, ValidityReport,
};
