//! Model Configuration
//!
//! YAML settings selecting the active model and per-model parameters.
//! A missing file falls back to the lexicon model with threshold 0.05.
//!
//! ```yaml
//! api_config:
//!   active_model: vader
//! model_config:
//!   vader:
//!     threshold: 0.05
//!   textblob:
//!     polarity_threshold: 0.0
//!     lexicon_path: models/en-sentiment.xml
//!   roberta:
//!     model_name: cardiffnlp/twitter-roberta-base-sentiment
//!     model_dir: models/twitter-roberta-base-sentiment
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;
use super::model::ModelKind;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

// ============================================================================
// CONFIG TYPES
// ============================================================================

/// Full settings document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentConfig {
    pub api_config: ApiConfig,
    #[serde(default)]
    pub model_config: ModelConfig,
}

/// Active model selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub active_model: ModelKind,
}

/// Per-model parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub vader: LexiconParams,
    #[serde(default)]
    pub textblob: PatternParams,
    #[serde(default)]
    pub roberta: TransformerParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconParams {
    /// Compound score at or above this is positive
    pub threshold: f64,
}

impl Default for LexiconParams {
    fn default() -> Self {
        Self { threshold: constants::DEFAULT_LEXICON_THRESHOLD }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternParams {
    /// Polarity strictly above this is positive
    pub polarity_threshold: f64,
    /// pattern `en-sentiment.xml` lexicon
    pub lexicon_path: PathBuf,
}

impl Default for PatternParams {
    fn default() -> Self {
        Self {
            polarity_threshold: constants::DEFAULT_PATTERN_THRESHOLD,
            lexicon_path: PathBuf::from(constants::DEFAULT_PATTERN_LEXICON),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformerParams {
    /// Checkpoint identifier
    pub model_name: String,
    /// Directory holding `model.onnx` and `tokenizer.json`
    pub model_dir: Option<PathBuf>,
    /// Output class mapped to positive
    pub positive_label: String,
    /// Token budget per input
    pub max_length: usize,
}

impl Default for TransformerParams {
    fn default() -> Self {
        Self {
            model_name: constants::DEFAULT_TRANSFORMER_MODEL.to_string(),
            model_dir: None,
            positive_label: constants::DEFAULT_POSITIVE_LABEL.to_string(),
            max_length: constants::DEFAULT_MAX_LENGTH,
        }
    }
}

impl TransformerParams {
    /// Model directory, derived from the checkpoint name when not set:
    /// `cardiffnlp/twitter-roberta-base-sentiment` -> `models/twitter-roberta-base-sentiment`
    pub fn resolved_dir(&self) -> PathBuf {
        if let Some(dir) = &self.model_dir {
            return dir.clone();
        }
        let leaf = self.model_name.rsplit('/').next().unwrap_or(&self.model_name);
        PathBuf::from("models").join(leaf)
    }
}

/// Where the active config came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

/// Result of a config load
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: SentimentConfig,
    pub source: ConfigSource,
}

// ============================================================================
// LOADING
// ============================================================================

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            api_config: ApiConfig { active_model: ModelKind::Vader },
            model_config: ModelConfig::default(),
        }
    }
}

impl SentimentConfig {
    /// Load from a YAML file. A missing file yields the default config.
    pub fn load(path: impl AsRef<Path>) -> Result<ConfigLoad, ConfigError> {
        let path = path.as_ref();

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Config {} not found, using defaults (vader)", path.display());
                return Ok(ConfigLoad {
                    config: Self::default(),
                    source: ConfigSource::Default,
                });
            }
            Err(source) => {
                return Err(ConfigError::Io { path: path.to_path_buf(), source });
            }
        };

        let config = Self::from_yaml(&raw)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;

        log::info!(
            "Loaded config {} (active model: {})",
            path.display(),
            config.api_config.active_model
        );

        Ok(ConfigLoad {
            config,
            source: ConfigSource::File(path.to_path_buf()),
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    pub fn active_model(&self) -> ModelKind {
        self.api_config.active_model
    }

    /// Copy of this config with another active model
    pub fn with_active_model(&self, kind: ModelKind) -> Self {
        Self {
            api_config: ApiConfig { active_model: kind },
            model_config: self.model_config.clone(),
        }
    }
}

/// Model parameters for tests: the bundled lexicon sample and a transformer
/// directory that does not exist
#[cfg(test)]
pub(crate) fn test_model_config() -> ModelConfig {
    let mut config = ModelConfig::default();
    config.textblob.lexicon_path =
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/en-sentiment-sample.xml"));
    config.roberta.model_dir = Some(PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/no-model")));
    config
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_falls_back_to_vader() {
        let dir = tempfile::tempdir().unwrap();
        let load = SentimentConfig::load(dir.path().join("nope.yaml")).unwrap();

        assert_eq!(load.source, ConfigSource::Default);
        assert_eq!(load.config.active_model(), ModelKind::Vader);
        assert_eq!(load.config.model_config.vader.threshold, 0.05);
    }

    #[test]
    fn test_full_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api_config:\n  active_model: textblob\nmodel_config:\n  vader:\n    threshold: 0.2\n  textblob:\n    polarity_threshold: 0.1\n  roberta:\n    model_name: org/some-model\n"
        )
        .unwrap();

        let load = SentimentConfig::load(file.path()).unwrap();
        assert_eq!(load.source, ConfigSource::File(file.path().to_path_buf()));

        let config = load.config;
        assert_eq!(config.active_model(), ModelKind::TextBlob);
        assert_eq!(config.model_config.vader.threshold, 0.2);
        assert_eq!(config.model_config.textblob.polarity_threshold, 0.1);
        assert_eq!(config.model_config.textblob.lexicon_path, PathBuf::from("models/en-sentiment.xml"));
        assert_eq!(config.model_config.roberta.model_name, "org/some-model");
        assert_eq!(config.model_config.roberta.positive_label, "LABEL_2");
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let config = SentimentConfig::from_yaml("api_config:\n  active_model: roberta\n").unwrap();
        assert_eq!(config.active_model(), ModelKind::Roberta);
        assert_eq!(config.model_config, ModelConfig::default());
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_config:\n  active_model: bert\n").unwrap();

        let err = SentimentConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_resolved_dir() {
        let params = TransformerParams::default();
        assert_eq!(params.resolved_dir(), PathBuf::from("models/twitter-roberta-base-sentiment"));

        let params = TransformerParams {
            model_dir: Some(PathBuf::from("/opt/roberta")),
            ..Default::default()
        };
        assert_eq!(params.resolved_dir(), PathBuf::from("/opt/roberta"));
    }

    #[test]
    fn test_with_active_model_keeps_params() {
        let mut config = SentimentConfig::default();
        config.model_config.vader.threshold = 0.3;

        let switched = config.with_active_model(ModelKind::Roberta);
        assert_eq!(switched.active_model(), ModelKind::Roberta);
        assert_eq!(switched.model_config.vader.threshold, 0.3);
        assert_eq!(config.active_model(), ModelKind::Vader);
    }
}
