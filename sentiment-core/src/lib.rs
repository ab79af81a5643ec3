//! Tweet Sentiment Battle - Core Library
//!
//! Three sentiment strategies behind one manager, an offline evaluator and
//! the terminal dashboard client.
//!
//! # Layout
//!
//! ```text
//! raw text ──► cleaner (optional) ──► ModelManager::predict ──► Sentiment
//!                                        │
//!                 ┌──────────────────────┼──────────────────────┐
//!                 ▼                      ▼                      ▼
//!          Lexicon (VADER)       Pattern (TextBlob)     Transformer (ONNX)
//! ```

pub mod api;
pub mod constants;
pub mod dashboard;
pub mod logic;

pub use logic::cleaner::clean_tweet;
pub use logic::config::{ConfigError, ConfigSource, SentimentConfig};
pub use logic::model::{ModelKind, ModelManager, ModelRegistry, ModelStatus, Sentiment};
