use candle_core::{DType, Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info};

use super::bert::BertEncoder;
use super::config::EmbedderConfig;
use super::device::select_device;
use super::error::EmbeddingError;
use super::utils::load_tokenizer_with_truncation;
use super::TextEmbedder;

/// Sentence embedder: encoder hidden states, attention-masked mean pooling, L2 norm.
pub struct SentenceEmbedder {
    encoder: BertEncoder,
    tokenizer: Tokenizer,
    device: Device,
    config: EmbedderConfig,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field("device", &format!("{:?}", self.device))
            .field("embedding_dim", &self.encoder.hidden_size())
            .field("config", &self.config)
            .finish()
    }
}

impl SentenceEmbedder {
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let device = select_device();
        debug!(?device, "Selected compute device for embedder");

        let encoder = BertEncoder::load(&config.model_path, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load encoder: {}", e),
            }
        })?;

        let tokenizer = load_tokenizer_with_truncation(&config.model_path, config.max_seq_len)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        info!(
            model_path = %config.model_path.display(),
            embedding_dim = encoder.hidden_size(),
            max_seq_len = config.max_seq_len,
            "Sentence embedder loaded"
        );

        Ok(Self {
            encoder,
            tokenizer,
            device,
            config,
        })
    }

    pub fn embedding_dim(&self) -> usize {
        self.encoder.hidden_size()
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            self.tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        if encoding.get_ids().is_empty() {
            return Ok(vec![0.0; self.embedding_dim()]);
        }

        debug!(
            text_len = text.len(),
            token_count = encoding.get_ids().len(),
            "Generating embedding"
        );

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        // [1, seq_len, hidden]
        let hidden_states = self
            .encoder
            .forward(&input_ids, &type_ids, Some(&attention_mask))?;

        // Mean over real tokens only: [1, seq_len, 1] mask broadcast over hidden.
        let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden_states.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?;
        let pooled = summed.broadcast_div(&counts)?.squeeze(0)?;

        Ok(normalize(pooled.to_vec1::<f32>()?))
    }
}

impl TextEmbedder for SentenceEmbedder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed(text)
    }
}

pub(crate) fn normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }

    embedding
}
