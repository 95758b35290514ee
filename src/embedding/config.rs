use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_MAX_SEQ_LEN;

use super::error::EmbeddingError;

const REQUIRED_FILES: [&str; 3] = ["config.json", "model.safetensors", "tokenizer.json"];

/// Configuration for [`SentenceEmbedder`](super::SentenceEmbedder).
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Model directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    pub model_path: PathBuf,
    /// Tokens kept per input; longer text is truncated.
    pub max_seq_len: usize,
}

impl EmbedderConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: model_path.into(),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }
        validate_model_dir(&self.model_path)
    }
}

/// Configuration for [`SequenceClassifier`](super::SequenceClassifier).
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Model directory (same layout as the embedder).
    pub model_path: PathBuf,
    /// Label names by class index; overrides the model's `id2label` when set.
    pub labels: Option<Vec<String>>,
    /// Tokens kept per input.
    pub max_seq_len: usize,
}

impl ClassifierConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: model_path.into(),
            labels: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }
        if let Some(labels) = &self.labels
            && labels.is_empty()
        {
            return Err(EmbeddingError::InvalidConfig {
                reason: "label override cannot be empty".to_string(),
            });
        }
        validate_model_dir(&self.model_path)
    }
}

fn validate_model_dir(path: &Path) -> Result<(), EmbeddingError> {
    if path.as_os_str().is_empty() {
        return Err(EmbeddingError::InvalidConfig {
            reason: "model_path is required".to_string(),
        });
    }

    if !path.is_dir() {
        return Err(EmbeddingError::ModelNotFound {
            path: path.to_path_buf(),
        });
    }

    for file in REQUIRED_FILES {
        if !path.join(file).exists() {
            return Err(EmbeddingError::ModelLoadFailed {
                reason: format!("Missing {} in {}", file, path.display()),
            });
        }
    }

    Ok(())
}
