//! Model Module - Sentiment Strategies
//!
//! Three strategies behind one closed enum, chosen once at construction:
//! - `lexicon` - VADER compound score
//! - `pattern` - TextBlob polarity from the pattern lexicon
//! - `transformer` - RoBERTa classifier on ONNX Runtime

pub mod lexicon;
pub mod manager;
pub mod pattern;
pub mod registry;
pub mod transformer;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::config::ModelConfig;

pub use lexicon::LexiconPredictor;
pub use manager::{ModelManager, ModelStatus};
pub use pattern::PatternPredictor;
pub use registry::{Comparison, ModelRegistry};
pub use transformer::TransformerPredictor;

// ============================================================================
// LABELS
// ============================================================================

/// Prediction label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// "Positive", "Negative", "Neutral"
    pub fn title(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// MODEL KIND
// ============================================================================

/// The three supported strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Vader,
    TextBlob,
    Roberta,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Vader, ModelKind::TextBlob, ModelKind::Roberta];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Vader => "vader",
            ModelKind::TextBlob => "textblob",
            ModelKind::Roberta => "roberta",
        }
    }

    /// Human-readable name with the approach in parentheses
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelKind::Vader => "VADER (Lexicon)",
            ModelKind::TextBlob => "TextBlob (Pattern)",
            ModelKind::Roberta => "RoBERTa (Transformer)",
        }
    }

    /// Column heading: "VADER", "TextBlob", "RoBERTa"
    pub fn short_name(&self) -> &'static str {
        match self {
            ModelKind::Vader => "VADER",
            ModelKind::TextBlob => "TextBlob",
            ModelKind::Roberta => "RoBERTa",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown model '{0}' (expected vader, textblob or roberta)")]
pub struct UnknownModel(pub String);

impl FromStr for ModelKind {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vader" => Ok(ModelKind::Vader),
            "textblob" => Ok(ModelKind::TextBlob),
            "roberta" => Ok(ModelKind::Roberta),
            _ => Err(UnknownModel(s.to_string())),
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("invalid sentiment lexicon: {0}")]
    Lexicon(String),

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("onnx runtime error: {0}")]
    Runtime(String),

    #[error("unexpected model output: {0}")]
    Output(String),
}

// ============================================================================
// PREDICTOR
// ============================================================================

/// A constructed strategy
#[derive(Debug)]
pub enum Predictor {
    Lexicon(LexiconPredictor),
    Pattern(PatternPredictor),
    Transformer(TransformerPredictor),
}

impl Predictor {
    /// Build the strategy for `kind`. The pattern and transformer strategies
    /// read files from disk and can fail.
    pub fn build(kind: ModelKind, config: &ModelConfig) -> Result<Self, ModelError> {
        Ok(match kind {
            ModelKind::Vader => Predictor::Lexicon(LexiconPredictor::new(&config.vader)),
            ModelKind::TextBlob => Predictor::Pattern(PatternPredictor::load(&config.textblob)?),
            ModelKind::Roberta => Predictor::Transformer(TransformerPredictor::load(&config.roberta)?),
        })
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Predictor::Lexicon(_) => ModelKind::Vader,
            Predictor::Pattern(_) => ModelKind::TextBlob,
            Predictor::Transformer(_) => ModelKind::Roberta,
        }
    }

    pub fn predict(&self, text: &str) -> Result<Sentiment, ModelError> {
        match self {
            Predictor::Lexicon(p) => Ok(p.predict(text)),
            Predictor::Pattern(p) => Ok(p.predict(text)),
            Predictor::Transformer(p) => p.predict(text),
        }
    }

    /// Strength of the decision in percent (0-100)
    pub fn intensity(&self, text: &str) -> Result<f64, ModelError> {
        match self {
            Predictor::Lexicon(p) => Ok(p.compound(text).abs() * 100.0),
            Predictor::Pattern(p) => Ok(p.polarity(text).abs() * 100.0),
            Predictor::Transformer(p) => p.classify(text).map(|c| f64::from(c.score) * 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::config::test_model_config;

    #[test]
    fn test_kind_round_trip_names() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.as_str().parse::<ModelKind>().unwrap(), kind);
        }
        assert_eq!(" VADER ".parse::<ModelKind>().unwrap(), ModelKind::Vader);
        assert!("bert".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ModelKind::TextBlob).unwrap(), "\"textblob\"");
        assert_eq!(serde_json::to_string(&Sentiment::Neutral).unwrap(), "\"neutral\"");
    }

    #[test]
    fn test_rule_based_predictors_build() {
        let config = test_model_config();
        let lexicon = Predictor::build(ModelKind::Vader, &config).unwrap();
        let pattern = Predictor::build(ModelKind::TextBlob, &config).unwrap();

        assert_eq!(lexicon.kind(), ModelKind::Vader);
        assert_eq!(pattern.kind(), ModelKind::TextBlob);
        assert_eq!(lexicon.predict("I love it").unwrap(), Sentiment::Positive);

        let intensity = pattern.intensity("not good").unwrap();
        assert!((intensity - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_pattern_needs_its_lexicon() {
        let mut config = test_model_config();
        config.textblob.lexicon_path = PathBuf::from("/nonexistent/en-sentiment.xml");

        let err = Predictor::build(ModelKind::TextBlob, &config).unwrap_err();
        assert!(matches!(err, ModelError::MissingFile(_)));
    }
}
