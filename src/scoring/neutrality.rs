use std::sync::Arc;

use tracing::{debug, warn};

use crate::constants::{
    CLASSIFIER_CHAR_LIMIT, NEUTRALITY_FALLBACK, NEUTRALITY_NEGATIVE, NEUTRALITY_NEUTRAL,
    NEUTRALITY_POSITIVE,
};
use crate::embedding::TextClassifier;
use crate::embedding::utils::truncate_chars;

use super::error::ScoringError;

/// Coarse sentiment bucket used as a proxy for content neutrality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeutralityBucket {
    Positive,
    Neutral,
    /// `negative` and every label outside the known vocabulary.
    Negative,
}

impl NeutralityBucket {
    /// Maps a classifier label (case-insensitive) to its bucket.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("positive") {
            NeutralityBucket::Positive
        } else if label.eq_ignore_ascii_case("neutral") {
            NeutralityBucket::Neutral
        } else {
            NeutralityBucket::Negative
        }
    }

    pub fn score(self) -> i32 {
        match self {
            NeutralityBucket::Positive => NEUTRALITY_POSITIVE,
            NeutralityBucket::Neutral => NEUTRALITY_NEUTRAL,
            NeutralityBucket::Negative => NEUTRALITY_NEGATIVE,
        }
    }
}

/// Neutrality of page content: one of `{30, 50, 100}`.
#[derive(Clone, Default)]
pub struct NeutralityScorer {
    classifier: Option<Arc<dyn TextClassifier>>,
}

impl std::fmt::Debug for NeutralityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeutralityScorer")
            .field("available", &self.is_available())
            .finish()
    }
}

impl NeutralityScorer {
    pub fn new(classifier: Option<Arc<dyn TextClassifier>>) -> Self {
        Self { classifier }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.classifier.is_some()
    }

    /// Classifies the first 512 characters and returns the bucket.
    pub fn try_bucket(&self, content: &str) -> Result<NeutralityBucket, ScoringError> {
        if content.trim().is_empty() {
            return Err(ScoringError::EmptyContent);
        }
        let classifier = self
            .classifier
            .as_ref()
            .ok_or(ScoringError::Unavailable {
                backend: "classification",
            })?;

        let excerpt = truncate_chars(content, CLASSIFIER_CHAR_LIMIT);
        let classification = classifier.classify(excerpt)?;
        let bucket = NeutralityBucket::from_label(&classification.label);

        debug!(
            label = %classification.label,
            confidence = classification.confidence,
            ?bucket,
            "Computed neutrality"
        );

        Ok(bucket)
    }

    pub fn try_neutrality(&self, content: &str) -> Result<i32, ScoringError> {
        self.try_bucket(content).map(NeutralityBucket::score)
    }

    /// Like [`try_neutrality`](Self::try_neutrality), with every error mapped to `50`.
    pub fn neutrality(&self, content: &str) -> i32 {
        match self.try_neutrality(content) {
            Ok(score) => score,
            Err(e) if e.is_expected_fallback() => {
                debug!(reason = %e, "Neutrality fallback");
                NEUTRALITY_FALLBACK
            }
            Err(e) => {
                warn!(error = %e, "Neutrality scoring failed, using fallback");
                NEUTRALITY_FALLBACK
            }
        }
    }
}
