use super::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::constants::{NEUTRALITY_FALLBACK, RELEVANCE_FALLBACK};
use crate::embedding::{
    Classification, EmbeddingError, FailingBackend, FixedLabelClassifier, StubEmbedder,
    TextClassifier, TextEmbedder,
};

/// Embedder returning canned vectors per exact input.
struct TableEmbedder(HashMap<&'static str, Vec<f32>>);

impl TextEmbedder for TableEmbedder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.0
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: format!("no vector for {text}"),
            })
    }
}

/// Classifier recording the text it was given.
#[derive(Default)]
struct RecordingClassifier {
    seen: Mutex<Vec<String>>,
}

impl TextClassifier for RecordingClassifier {
    fn classify(&self, text: &str) -> Result<Classification, EmbeddingError> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(Classification {
            label: "neutral".to_string(),
            confidence: 0.9,
        })
    }
}

fn stub_relevance() -> RelevanceScorer {
    RelevanceScorer::new(Some(Arc::new(StubEmbedder::default())))
}

fn neutrality_with(label: &str) -> NeutralityScorer {
    NeutralityScorer::new(Some(Arc::new(FixedLabelClassifier::new(label))))
}

mod cosine_tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let v = [0.3, 0.4, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_opposite_vectors() {
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }
}

mod relevance_tests {
    use super::*;

    #[test]
    fn test_empty_content_falls_back() {
        let scorer = stub_relevance();
        assert!(matches!(
            scorer.try_relevance("query", ""),
            Err(ScoringError::EmptyContent)
        ));
        assert_eq!(scorer.relevance("query", ""), RELEVANCE_FALLBACK);
        assert_eq!(scorer.relevance("query", "   "), RELEVANCE_FALLBACK);
    }

    #[test]
    fn test_unavailable_falls_back() {
        let scorer = RelevanceScorer::unavailable();
        assert!(!scorer.is_available());
        assert!(matches!(
            scorer.try_relevance("query", "content"),
            Err(ScoringError::Unavailable { .. })
        ));
        assert_eq!(scorer.relevance("query", "content"), RELEVANCE_FALLBACK);
    }

    #[test]
    fn test_inference_error_falls_back() {
        let scorer = RelevanceScorer::new(Some(Arc::new(FailingBackend)));
        assert!(matches!(
            scorer.try_relevance("query", "content"),
            Err(ScoringError::Backend(_))
        ));
        assert_eq!(scorer.relevance("query", "content"), RELEVANCE_FALLBACK);
    }

    #[test]
    fn test_scaled_and_truncated() {
        let scorer = RelevanceScorer::new(Some(Arc::new(TableEmbedder(HashMap::from([
            ("q", vec![1.0, 0.0]),
            ("c", vec![0.6, 0.8]),
        ])))));
        assert_eq!(scorer.try_relevance("q", "c").expect("scores"), 60);
    }

    #[test]
    fn test_negative_similarity_is_not_clamped() {
        let scorer = RelevanceScorer::new(Some(Arc::new(TableEmbedder(HashMap::from([
            ("q", vec![1.0, 0.0]),
            ("c", vec![-1.0, 0.0]),
        ])))));
        assert_eq!(scorer.relevance("q", "c"), -100);
    }

    #[test]
    fn test_dimension_mismatch() {
        let scorer = RelevanceScorer::new(Some(Arc::new(TableEmbedder(HashMap::from([
            ("q", vec![1.0, 0.0]),
            ("c", vec![1.0, 0.0, 0.0]),
        ])))));
        assert!(matches!(
            scorer.try_relevance("q", "c"),
            Err(ScoringError::DimensionMismatch {
                query: 2,
                content: 3
            })
        ));
        assert_eq!(scorer.relevance("q", "c"), RELEVANCE_FALLBACK);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let scorer = stub_relevance();
        let first = scorer.relevance("effects of climate change", "Climate change raises sea levels.");
        for _ in 0..5 {
            assert_eq!(
                scorer.relevance("effects of climate change", "Climate change raises sea levels."),
                first
            );
        }
    }

    #[test]
    fn test_identical_text_scores_near_maximum() {
        let scorer = stub_relevance();
        let score = scorer.relevance("newton laws of motion", "newton laws of motion");
        assert!((99..=100).contains(&score));
    }

    #[test]
    fn test_scale_similarity() {
        assert_eq!(relevance::scale_similarity(0.0), 0);
        assert_eq!(relevance::scale_similarity(0.4567), 45);
        assert_eq!(relevance::scale_similarity(-0.4567), -45);
    }

    #[test]
    fn test_scale_similarity_truncates_below_boundary() {
        // 0.57f32 is 0.5699999928..., so the score stays 56 rather than rounding to 57.
        assert_eq!(relevance::scale_similarity(0.57), 56);
        assert_eq!(relevance::scale_similarity(0.29), 28);
        assert_eq!(relevance::scale_similarity(-0.57), -56);
    }
}

mod neutrality_tests {
    use super::*;

    #[test]
    fn test_bucket_mapping() {
        assert_eq!(NeutralityBucket::from_label("positive"), NeutralityBucket::Positive);
        assert_eq!(NeutralityBucket::from_label("POSITIVE"), NeutralityBucket::Positive);
        assert_eq!(NeutralityBucket::from_label("Neutral"), NeutralityBucket::Neutral);
        assert_eq!(NeutralityBucket::from_label("negative"), NeutralityBucket::Negative);
        assert_eq!(NeutralityBucket::from_label("mixed"), NeutralityBucket::Negative);
        assert_eq!(NeutralityBucket::from_label("LABEL_2"), NeutralityBucket::Negative);
        assert_eq!(NeutralityBucket::from_label(""), NeutralityBucket::Negative);
    }

    #[test]
    fn test_bucket_scores() {
        assert_eq!(NeutralityBucket::Positive.score(), 100);
        assert_eq!(NeutralityBucket::Neutral.score(), 50);
        assert_eq!(NeutralityBucket::Negative.score(), 30);
    }

    #[test]
    fn test_label_scores() {
        assert_eq!(neutrality_with("positive").neutrality("text"), 100);
        assert_eq!(neutrality_with("neutral").neutrality("text"), 50);
        assert_eq!(neutrality_with("negative").neutrality("text"), 30);
        assert_eq!(neutrality_with("mixed").neutrality("text"), 30);
    }

    #[test]
    fn test_empty_content_falls_back() {
        let scorer = neutrality_with("positive");
        assert_eq!(scorer.neutrality(""), NEUTRALITY_FALLBACK);
        assert!(matches!(
            scorer.try_neutrality(""),
            Err(ScoringError::EmptyContent)
        ));
    }

    #[test]
    fn test_unavailable_falls_back() {
        let scorer = NeutralityScorer::unavailable();
        assert!(!scorer.is_available());
        assert_eq!(scorer.neutrality("content"), NEUTRALITY_FALLBACK);
    }

    #[test]
    fn test_inference_error_falls_back() {
        let scorer = NeutralityScorer::new(Some(Arc::new(FailingBackend)));
        assert!(scorer.try_neutrality("content").is_err());
        assert_eq!(scorer.neutrality("content"), NEUTRALITY_FALLBACK);
    }

    #[test]
    fn test_classifier_sees_first_512_chars() {
        let classifier = Arc::new(RecordingClassifier::default());
        let scorer = NeutralityScorer::new(Some(classifier.clone()));

        let long = "é".repeat(600);
        assert_eq!(scorer.neutrality(&long), 50);
        scorer.neutrality("short");

        let seen = classifier.seen.lock().unwrap();
        assert_eq!(seen[0].chars().count(), 512);
        assert_eq!(seen[1], "short");
    }
}
