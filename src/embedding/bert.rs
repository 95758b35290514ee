use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use candle_transformers::models::xlm_roberta::{
    Config as RobertaConfig, XLMRobertaForSequenceClassification, XLMRobertaModel,
};
use serde::Deserialize;

const ROBERTA_PROBE_TENSOR: &str = "roberta.embeddings.word_embeddings.weight";

/// Fields of `config.json` that candle's model configs do not carry.
#[derive(Debug, Default, Deserialize)]
struct HeadConfig {
    #[serde(default)]
    model_type: Option<String>,
    #[serde(default)]
    id2label: HashMap<String, String>,
}

/// Encoder family of a checkpoint.
///
/// RoBERTa position ids start after the padding index, so those checkpoints cannot run
/// through the BERT embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    Bert,
    Roberta,
}

impl Architecture {
    fn detect(model_type: Option<&str>, has_roberta_weights: bool) -> Self {
        match model_type {
            Some("roberta" | "xlm-roberta" | "camembert") => Architecture::Roberta,
            Some(_) => Architecture::Bert,
            None if has_roberta_weights => Architecture::Roberta,
            None => Architecture::Bert,
        }
    }
}

fn read_config_json(model_dir: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(model_dir.join("config.json"))?)
}

fn head_config(content: &str) -> Result<HeadConfig> {
    serde_json::from_str(content)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse id2label: {}", e)))
}

fn bert_config(content: &str) -> Result<Config> {
    serde_json::from_str(content)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))
}

/// Parses a RoBERTa config, defaulting `position_embedding_type` which older
/// checkpoints omit.
fn roberta_config(content: &str) -> Result<RobertaConfig> {
    let mut value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;
    if let Some(fields) = value.as_object_mut() {
        fields
            .entry("position_embedding_type")
            .or_insert_with(|| serde_json::Value::from("absolute"));
    }
    serde_json::from_value(value)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse RoBERTa config: {}", e)))
}

fn var_builder(model_dir: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let weights_path = model_dir.join("model.safetensors");
    // SAFETY: the weights file is only read, and stays in place for the process lifetime.
    unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device) }
}

fn architecture(head: &HeadConfig, vb: &VarBuilder) -> Architecture {
    Architecture::detect(
        head.model_type.as_deref(),
        vb.contains_tensor(ROBERTA_PROBE_TENSOR),
    )
}

enum EncoderModel {
    Bert(BertModel),
    Roberta(XLMRobertaModel),
}

/// Bare encoder returning per-token hidden states.
#[derive(Clone)]
pub struct BertEncoder {
    model: Arc<EncoderModel>,
    architecture: Architecture,
    hidden_size: usize,
}

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let content = read_config_json(model_dir)?;
        let head = head_config(&content)?;
        let vb = var_builder(model_dir, device)?;
        Self::from_var_builder(vb, &content, &head)
    }

    fn from_var_builder(vb: VarBuilder, content: &str, head: &HeadConfig) -> Result<Self> {
        let architecture = architecture(head, &vb);
        let (model, hidden_size) = match architecture {
            Architecture::Bert => {
                let config = bert_config(content)?;
                let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
                    BertModel::load(vb.pp("bert"), &config)?
                } else {
                    BertModel::load(vb, &config)?
                };
                (EncoderModel::Bert(model), config.hidden_size)
            }
            Architecture::Roberta => {
                let config = roberta_config(content)?;
                let model = if vb.contains_tensor(ROBERTA_PROBE_TENSOR) {
                    XLMRobertaModel::new(&config, vb.pp("roberta"))?
                } else {
                    XLMRobertaModel::new(&config, vb)?
                };
                (EncoderModel::Roberta(model), config.hidden_size)
            }
        };

        Ok(Self {
            model: Arc::new(model),
            architecture,
            hidden_size,
        })
    }

    /// Returns hidden states shaped `[batch, seq_len, hidden_size]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        match self.model.as_ref() {
            EncoderModel::Bert(model) => model.forward(input_ids, token_type_ids, attention_mask),
            EncoderModel::Roberta(model) => {
                let ones;
                let mask = match attention_mask {
                    Some(mask) => mask,
                    None => {
                        ones = input_ids.ones_like()?;
                        &ones
                    }
                };
                model.forward(input_ids, mask, token_type_ids, None, None, None)
            }
        }
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }
}

enum ClassifierModel {
    /// BERT style: a single projection of the `[CLS]` state.
    Bert { bert: BertModel, classifier: Linear },
    /// RoBERTa encoder with its dense + tanh + out_proj head.
    Roberta(XLMRobertaForSequenceClassification),
}

/// Encoder with a sequence classification head.
#[derive(Clone)]
pub struct BertClassifier {
    inner: Arc<ClassifierModel>,
    architecture: Architecture,
    labels: Arc<[String]>,
}

impl BertClassifier {
    /// Loads the model; `labels` overrides the checkpoint's `id2label` when given.
    pub fn load<P: AsRef<Path>>(
        model_dir: P,
        labels: Option<&[String]>,
        device: &Device,
    ) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let content = read_config_json(model_dir)?;
        let vb = var_builder(model_dir, device)?;
        Self::from_var_builder(vb, &content, labels)
    }

    fn from_var_builder(vb: VarBuilder, content: &str, labels: Option<&[String]>) -> Result<Self> {
        let head = head_config(content)?;

        let labels: Vec<String> = match labels {
            Some(labels) => labels.to_vec(),
            None => labels_by_index(head.id2label.clone())?,
        };
        if labels.is_empty() {
            return Err(candle::Error::Msg(
                "classifier has no labels (id2label missing)".to_string(),
            ));
        }

        let architecture = architecture(&head, &vb);
        let model = match architecture {
            Architecture::Bert => {
                let config = bert_config(content)?;
                let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
                    BertModel::load(vb.pp("bert"), &config)?
                } else {
                    BertModel::load(vb.clone(), &config)?
                };
                let classifier =
                    candle_nn::linear(config.hidden_size, labels.len(), vb.pp("classifier"))?;
                ClassifierModel::Bert { bert, classifier }
            }
            Architecture::Roberta => {
                let config = roberta_config(content)?;
                ClassifierModel::Roberta(XLMRobertaForSequenceClassification::new(
                    labels.len(),
                    &config,
                    vb,
                )?)
            }
        };

        Ok(Self {
            inner: Arc::new(model),
            architecture,
            labels: labels.into(),
        })
    }

    /// Returns logits shaped `[batch, num_labels]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        match self.inner.as_ref() {
            ClassifierModel::Bert { bert, classifier } => {
                let output = bert.forward(input_ids, token_type_ids, Some(attention_mask))?;
                let cls_token = output.i((.., 0, ..))?;
                classifier.forward(&cls_token)
            }
            ClassifierModel::Roberta(model) => {
                model.forward(input_ids, attention_mask, token_type_ids)
            }
        }
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Orders an `id2label` map (`{"0": "negative", ...}`) by numeric class index.
fn labels_by_index(id2label: HashMap<String, String>) -> Result<Vec<String>> {
    let mut indexed = id2label
        .into_iter()
        .map(|(id, label)| {
            id.parse::<usize>()
                .map(|idx| (idx, label))
                .map_err(|e| candle::Error::Msg(format!("Invalid id2label key '{}': {}", id, e)))
        })
        .collect::<Result<Vec<_>>>()?;
    indexed.sort_by_key(|(idx, _)| *idx);

    for (expected, (idx, _)) in indexed.iter().enumerate() {
        if *idx != expected {
            return Err(candle::Error::Msg(format!(
                "id2label is not contiguous: missing class {}",
                expected
            )));
        }
    }

    Ok(indexed.into_iter().map(|(_, label)| label).collect())
}
