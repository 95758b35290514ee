use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;

use super::{
    ClassifierConfig, EmbedderConfig, SentenceEmbedder, SequenceClassifier, TextClassifier,
    TextEmbedder,
};

/// Shared, read-only model handles. `None` means the capability is unavailable.
#[derive(Clone, Default)]
pub struct Backends {
    pub embedder: Option<Arc<dyn TextEmbedder>>,
    pub classifier: Option<Arc<dyn TextClassifier>>,
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("embedder", &self.embedder.is_some())
            .field("classifier", &self.classifier.is_some())
            .finish()
    }
}

impl Backends {
    /// No backends: every score takes its fallback value.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn new(
        embedder: Option<Arc<dyn TextEmbedder>>,
        classifier: Option<Arc<dyn TextClassifier>>,
    ) -> Self {
        Self {
            embedder,
            classifier,
        }
    }

    /// Loads whatever the config names. Load failures are logged, never returned.
    pub fn load(config: &Config) -> Self {
        if config.fallback_mode {
            warn!("Fallback mode enabled, model backends disabled");
            return Self::unavailable();
        }

        let embedder = config.embedder_path.as_ref().and_then(|path| {
            match SentenceEmbedder::load(EmbedderConfig::new(path.clone())) {
                Ok(embedder) => Some(Arc::new(embedder) as Arc<dyn TextEmbedder>),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Embedder unavailable");
                    None
                }
            }
        });

        let classifier = config.classifier_path.as_ref().and_then(|path| {
            let mut classifier_config = ClassifierConfig::new(path.clone());
            if let Some(labels) = &config.classifier_labels {
                classifier_config = classifier_config.with_labels(labels.clone());
            }

            match SequenceClassifier::load(classifier_config) {
                Ok(classifier) => Some(Arc::new(classifier) as Arc<dyn TextClassifier>),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Classifier unavailable");
                    None
                }
            }
        });

        if embedder.is_none() && classifier.is_none() {
            warn!("No model backends available, running in fallback mode");
        } else {
            info!(
                embedder = embedder.is_some(),
                classifier = classifier.is_some(),
                "Model backends ready"
            );
        }

        Self {
            embedder,
            classifier,
        }
    }

    /// Returns `true` if neither backend is present.
    pub fn is_unavailable(&self) -> bool {
        self.embedder.is_none() && self.classifier.is_none()
    }
}
