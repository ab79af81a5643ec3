//! Model Manager
//!
//! Owns one strategy and exposes `predict(text) -> Sentiment`. A strategy
//! that failed to load leaves the manager degraded: predictions return
//! `Neutral` and `status()` reports why.

use serde::{Deserialize, Serialize};

use super::{ModelError, ModelKind, Predictor, Sentiment};
use crate::constants;
use crate::logic::config::{ModelConfig, SentimentConfig};

/// Load state of a manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStatus {
    pub model: ModelKind,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
}

#[derive(Debug)]
enum Engine {
    Ready(Predictor),
    Degraded(String),
}

#[derive(Debug)]
pub struct ModelManager {
    kind: ModelKind,
    engine: Engine,
}

impl ModelManager {
    /// Build `kind`, failing if the strategy cannot be loaded
    pub fn load(kind: ModelKind, config: &ModelConfig) -> Result<Self, ModelError> {
        let predictor = Predictor::build(kind, config)?;
        Ok(Self { kind, engine: Engine::Ready(predictor) })
    }

    /// Build `kind`, degrading to neutral predictions if loading fails
    pub fn new(kind: ModelKind, config: &ModelConfig) -> Self {
        match Self::load(kind, config) {
            Ok(manager) => manager,
            Err(e) => {
                log::warn!("Model '{}' unavailable, predictions will be neutral: {}", kind, e);
                Self::degraded(kind, e.to_string())
            }
        }
    }

    /// Build the active model of a config
    pub fn from_config(config: &SentimentConfig) -> Self {
        Self::new(config.active_model(), &config.model_config)
    }

    pub fn degraded(kind: ModelKind, reason: impl Into<String>) -> Self {
        Self { kind, engine: Engine::Degraded(reason.into()) }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.engine, Engine::Degraded(_))
    }

    pub fn status(&self) -> ModelStatus {
        match &self.engine {
            Engine::Ready(_) => ModelStatus {
                model: self.kind,
                ready: true,
                degraded_reason: None,
            },
            Engine::Degraded(reason) => ModelStatus {
                model: self.kind,
                ready: false,
                degraded_reason: Some(reason.clone()),
            },
        }
    }

    /// Predict a label. Never fails: a degraded manager or an inference
    /// error yields `Neutral`.
    pub fn predict(&self, text: &str) -> Sentiment {
        match &self.engine {
            Engine::Ready(predictor) => predictor.predict(text).unwrap_or_else(|e| {
                log::error!("{} prediction failed: {}", self.kind, e);
                Sentiment::Neutral
            }),
            Engine::Degraded(_) => Sentiment::Neutral,
        }
    }

    /// Decision strength in percent, `None` when degraded or on error
    pub fn intensity(&self, text: &str) -> Option<f64> {
        match &self.engine {
            Engine::Ready(predictor) => predictor.intensity(text)
                .map_err(|e| log::error!("{} intensity failed: {}", self.kind, e))
                .ok(),
            Engine::Degraded(_) => None,
        }
    }

    /// Confidence reported by the API (placeholder, not calibrated)
    pub fn reported_confidence(&self) -> f64 {
        match self.kind {
            ModelKind::Roberta => constants::TRANSFORMER_PLACEHOLDER_CONFIDENCE,
            ModelKind::Vader | ModelKind::TextBlob => constants::RULE_BASED_CONFIDENCE,
        }
    }
}
