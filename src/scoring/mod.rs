//! Relevance and neutrality scoring.
//!
//! Both scorers hold an optional backend handle. With no backend, or with empty
//! content, they return their fallback constants: `0` for relevance, `50` for
//! neutrality. Inference errors degrade the same way (with a warning) so a single bad
//! page never aborts a batch; use the `try_*` methods to observe the error instead.

pub mod error;
pub mod neutrality;
pub mod relevance;

#[cfg(test)]
mod tests;

pub use error::ScoringError;
pub use neutrality::{NeutralityBucket, NeutralityScorer};
pub use relevance::RelevanceScorer;

/// Cosine similarity in `[-1, 1]`; `0.0` for mismatched, empty or zero-norm vectors.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
