//! Model Registry
//!
//! Lazily builds one manager per strategy on first use and shares it
//! read-only afterwards.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::{ModelKind, ModelManager, ModelStatus, Sentiment};
use crate::logic::config::ModelConfig;

/// One label per strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub vader: Sentiment,
    pub textblob: Sentiment,
    pub roberta: Sentiment,
}

impl Comparison {
    pub fn get(&self, kind: ModelKind) -> Sentiment {
        match kind {
            ModelKind::Vader => self.vader,
            ModelKind::TextBlob => self.textblob,
            ModelKind::Roberta => self.roberta,
        }
    }
}

#[derive(Debug)]
pub struct ModelRegistry {
    config: ModelConfig,
    vader: OnceCell<ModelManager>,
    textblob: OnceCell<ModelManager>,
    roberta: OnceCell<ModelManager>,
}

impl ModelRegistry {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            vader: OnceCell::new(),
            textblob: OnceCell::new(),
            roberta: OnceCell::new(),
        }
    }

    fn cell(&self, kind: ModelKind) -> &OnceCell<ModelManager> {
        match kind {
            ModelKind::Vader => &self.vader,
            ModelKind::TextBlob => &self.textblob,
            ModelKind::Roberta => &self.roberta,
        }
    }

    /// Manager for `kind`, constructed on first call
    pub fn get(&self, kind: ModelKind) -> &ModelManager {
        self.cell(kind).get_or_init(|| {
            log::info!("Initializing model '{}'", kind);
            ModelManager::new(kind, &self.config)
        })
    }

    pub fn is_initialized(&self, kind: ModelKind) -> bool {
        self.cell(kind).get().is_some()
    }

    /// Status of every manager built so far
    pub fn statuses(&self) -> Vec<ModelStatus> {
        ModelKind::ALL
            .iter()
            .filter_map(|&kind| self.cell(kind).get().map(ModelManager::status))
            .collect()
    }

    /// Run all three strategies on the same text
    pub fn compare(&self, text: &str) -> Comparison {
        Comparison {
            vader: self.get(ModelKind::Vader).predict(text),
            textblob: self.get(ModelKind::TextBlob).predict(text),
            roberta: self.get(ModelKind::Roberta).predict(text),
        }
    }
}
