//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `VALIDITY_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VALIDITY_*` overrides on top of defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Sentence embedding model directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    pub embedder_path: Option<PathBuf>,

    /// Sequence classification model directory (same layout as the embedder).
    pub classifier_path: Option<PathBuf>,

    /// Label names overriding the classifier's `id2label`, in class-index order.
    pub classifier_labels: Option<Vec<String>>,

    /// User-Agent sent with page fetches. Default: a desktop browser string.
    pub user_agent: Option<String>,

    /// Forces both model backends to be treated as unavailable. Default: `false`.
    pub fallback_mode: bool,
}

impl Config {
    const ENV_EMBEDDER_PATH: &'static str = "VALIDITY_EMBEDDER_PATH";
    const ENV_CLASSIFIER_PATH: &'static str = "VALIDITY_CLASSIFIER_PATH";
    const ENV_CLASSIFIER_LABELS: &'static str = "VALIDITY_CLASSIFIER_LABELS";
    const ENV_USER_AGENT: &'static str = "VALIDITY_USER_AGENT";
    const ENV_FALLBACK_MODE: &'static str = "VALIDITY_FALLBACK_MODE";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let embedder_path = Self::parse_optional_path_from_env(Self::ENV_EMBEDDER_PATH);
        let classifier_path = Self::parse_optional_path_from_env(Self::ENV_CLASSIFIER_PATH);
        let classifier_labels = Self::parse_list_from_env(Self::ENV_CLASSIFIER_LABELS)?;
        let user_agent = Self::parse_optional_string_from_env(Self::ENV_USER_AGENT);
        let fallback_mode = Self::parse_bool_from_env(Self::ENV_FALLBACK_MODE)?;

        Ok(Self {
            embedder_path,
            classifier_path,
            classifier_labels,
            user_agent,
            fallback_mode,
        })
    }

    /// Validates model paths (does not load anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in [&self.embedder_path, &self.classifier_path]
            .into_iter()
            .flatten()
        {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `true` if at least one model backend could be loaded from this config.
    pub fn has_backends(&self) -> bool {
        !self.fallback_mode && (self.embedder_path.is_some() || self.classifier_path.is_some())
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_list_from_env(var_name: &'static str) -> Result<Option<Vec<String>>, ConfigError> {
        let Some(raw) = Self::parse_optional_string_from_env(var_name) else {
            return Ok(None);
        };

        let labels: Vec<String> = raw.split(',').map(|s| s.trim().to_string()).collect();
        if labels.iter().any(String::is_empty) {
            return Err(ConfigError::InvalidValue {
                name: var_name,
                value: raw,
                reason: "label list contains an empty entry".to_string(),
            });
        }

        Ok(Some(labels))
    }

    fn parse_bool_from_env(var_name: &'static str) -> Result<bool, ConfigError> {
        let Some(raw) = Self::parse_optional_string_from_env(var_name) else {
            return Ok(false);
        };

        match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                name: var_name,
                value: raw,
                reason: "expected a boolean".to_string(),
            }),
        }
    }
}
