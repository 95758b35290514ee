use candle_core::{D, Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use super::bert::BertClassifier;
use super::config::ClassifierConfig;
use super::device::select_device;
use super::error::EmbeddingError;
use super::utils::load_tokenizer_with_truncation;
use super::{Classification, TextClassifier};

/// Single-label text classifier (e.g. a three-way sentiment model).
pub struct SequenceClassifier {
    model: BertClassifier,
    tokenizer: Tokenizer,
    device: Device,
    config: ClassifierConfig,
}

impl std::fmt::Debug for SequenceClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceClassifier")
            .field("device", &format!("{:?}", self.device))
            .field("labels", &self.model.labels())
            .field("config", &self.config)
            .finish()
    }
}

impl SequenceClassifier {
    pub fn load(config: ClassifierConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let device = select_device();
        debug!(?device, "Selected compute device for classifier");

        let model = BertClassifier::load(&config.model_path, config.labels.as_deref(), &device)
            .map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load classifier: {}", e),
            })?;

        let tokenizer = load_tokenizer_with_truncation(&config.model_path, config.max_seq_len)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        info!(
            model_path = %config.model_path.display(),
            labels = ?model.labels(),
            "Sequence classifier loaded"
        );

        Ok(Self {
            model,
            tokenizer,
            device,
            config,
        })
    }

    pub fn labels(&self) -> &[String] {
        self.model.labels()
    }

    /// Softmax probabilities for every label, in class-index order.
    pub fn probabilities(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            self.tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = self
            .model
            .forward(&input_ids, &type_ids, &attention_mask)?;
        let probs = candle_nn::ops::softmax(&logits, D::Minus1)?
            .squeeze(0)?
            .to_vec1::<f32>()?;

        Ok(probs)
    }
}

impl TextClassifier for SequenceClassifier {
    fn classify(&self, text: &str) -> Result<Classification, EmbeddingError> {
        let probs = self.probabilities(text)?;

        let (index, confidence) = probs
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: "classifier produced no logits".to_string(),
            })?;

        let label = self
            .labels()
            .get(index)
            .cloned()
            .ok_or_else(|| EmbeddingError::InvalidConfig {
                reason: format!(
                    "class index {} has no label ({} labels)",
                    index,
                    self.labels().len()
                ),
            })?;

        debug!(label = %label, confidence, "Classified text");

        Ok(Classification { label, confidence })
    }
}
