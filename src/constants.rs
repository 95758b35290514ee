//! Cross-cutting, shared constants.
//!
//! These values are fixed by the scoring contract. They are not configurable at runtime;
//! changing any of them changes what a "validity score" means.

use std::time::Duration;

/// Socket timeout for a single page fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum redirects followed before a fetch is treated as failed.
pub const MAX_REDIRECTS: usize = 10;

/// Characters of page text handed to the sentiment classifier.
pub const CLASSIFIER_CHAR_LIMIT: usize = 512;

/// Token limit for both encoder backends.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Multiplier applied to cosine similarity to produce the relevance score.
pub const RELEVANCE_SCALE: f64 = 100.0;

/// Relevance reported when content is empty or no embedder is available.
pub const RELEVANCE_FALLBACK: i32 = 0;

/// Neutrality for a `positive` classifier label.
pub const NEUTRALITY_POSITIVE: i32 = 100;

/// Neutrality for a `neutral` classifier label, and the fallback when no classifier runs.
pub const NEUTRALITY_NEUTRAL: i32 = 50;

/// Neutrality for `negative` and any label outside the known vocabulary.
pub const NEUTRALITY_NEGATIVE: i32 = 30;

/// Neutrality reported when content is empty or no classifier is available.
pub const NEUTRALITY_FALLBACK: i32 = NEUTRALITY_NEUTRAL;

/// Weight of relevance in the final score.
pub const RELEVANCE_WEIGHT: f64 = 0.5;

/// Weight of neutrality in the final score.
pub const NEUTRALITY_WEIGHT: f64 = 0.5;

/// Final score of the degraded ("no data") result.
pub const DEGRADED_FINAL_SCORE: f64 = 25.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        assert!((RELEVANCE_WEIGHT + NEUTRALITY_WEIGHT - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degraded_final_matches_fallbacks() {
        let combined = RELEVANCE_WEIGHT * f64::from(RELEVANCE_FALLBACK)
            + NEUTRALITY_WEIGHT * f64::from(NEUTRALITY_FALLBACK);
        assert_eq!(combined, DEGRADED_FINAL_SCORE);
    }

    #[test]
    fn test_fetch_timeout_is_ten_seconds() {
        assert_eq!(FETCH_TIMEOUT.as_secs(), 10);
    }
}
