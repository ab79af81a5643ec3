//! Logic Module - Sentiment Engines & Evaluation
//!
//! - `config` - YAML model configuration with default fallback
//! - `cleaner` - tweet text normalization
//! - `model/` - lexicon, pattern and transformer strategies behind one manager
//! - `dataset/` - labeled corpus reader and sampler
//! - `evaluator/` - offline accuracy benchmark

pub mod cleaner;
pub mod config;
pub mod dataset;
pub mod evaluator;
pub mod model;
