use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::constants::{
    DEGRADED_FINAL_SCORE, NEUTRALITY_FALLBACK, NEUTRALITY_WEIGHT, RELEVANCE_FALLBACK,
    RELEVANCE_WEIGHT,
};
use crate::fetch::EmptyReason;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("query text is empty")]
    Empty,
}

/// A user's information need. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Trims `text` and rejects it if nothing is left.
    pub fn new(text: impl Into<String>) -> Result<Self, QueryError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        if trimmed.len() == text.len() {
            Ok(Self(text))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The three numbers produced for one (query, URL) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    /// Semantic relevance, nominally 0-100 (unclamped).
    pub relevance: i32,
    /// Neutrality bucket: 30, 50 or 100.
    pub neutrality: i32,
    /// `0.5 * relevance + 0.5 * neutrality`.
    #[serde(rename = "final")]
    pub final_score: f64,
}

impl ScoreComponents {
    /// Combines the two signals with the fixed equal weights.
    pub fn combine(relevance: i32, neutrality: i32) -> Self {
        Self {
            relevance,
            neutrality,
            final_score: RELEVANCE_WEIGHT * f64::from(relevance)
                + NEUTRALITY_WEIGHT * f64::from(neutrality),
        }
    }

    /// The fixed "no data" triple: `{0, 50, 25.0}`.
    pub fn degraded() -> Self {
        Self {
            relevance: RELEVANCE_FALLBACK,
            neutrality: NEUTRALITY_FALLBACK,
            final_score: DEGRADED_FINAL_SCORE,
        }
    }
}

/// Why a report carries the degraded triple instead of computed scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedReason {
    /// Network error, timeout or non-success status.
    FetchFailed { reason: String },
    /// The page had no paragraph text.
    NoParagraphs,
    /// Neither the embedder nor the classifier is available.
    BackendsUnavailable,
}

impl DegradedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DegradedReason::FetchFailed { .. } => "fetch_failed",
            DegradedReason::NoParagraphs => "no_paragraphs",
            DegradedReason::BackendsUnavailable => "backends_unavailable",
        }
    }
}

impl From<EmptyReason> for DegradedReason {
    fn from(reason: EmptyReason) -> Self {
        match reason {
            EmptyReason::Failed(err) => DegradedReason::FetchFailed {
                reason: err.to_string(),
            },
            EmptyReason::NoParagraphs => DegradedReason::NoParagraphs,
        }
    }
}

impl std::fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegradedReason::FetchFailed { reason } => write!(f, "fetch failed: {}", reason),
            DegradedReason::NoParagraphs => write!(f, "no paragraph text"),
            DegradedReason::BackendsUnavailable => write!(f, "model backends unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Scores were computed from page content.
    Scored,
    /// The degraded triple was returned.
    Degraded(DegradedReason),
}

impl Outcome {
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Scored => "scored",
            Outcome::Degraded(reason) => reason.as_str(),
        }
    }
}

fn serialize_outcome<S: Serializer>(outcome: &Outcome, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(outcome.status())
}

/// Result of scoring one (query, URL) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidityReport {
    #[serde(flatten)]
    pub components: ScoreComponents,
    #[serde(rename = "status", serialize_with = "serialize_outcome")]
    pub outcome: Outcome,
}

impl ValidityReport {
    pub fn scored(components: ScoreComponents) -> Self {
        Self {
            components,
            outcome: Outcome::Scored,
        }
    }

    pub fn degraded(reason: DegradedReason) -> Self {
        Self {
            components: ScoreComponents::degraded(),
            outcome: Outcome::Degraded(reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.outcome, Outcome::Degraded(_))
    }

    pub fn relevance(&self) -> i32 {
        self.components.relevance
    }

    pub fn neutrality(&self) -> i32 {
        self.components.neutrality
    }

    pub fn final_score(&self) -> f64 {
        self.components.final_score
    }
}
