//! Evaluator - Offline Accuracy Benchmark
//!
//! Samples the labeled corpus once, then scores each strategy on the same
//! sample with its own independent manager. Accuracy is
//! `matches / sample_size * 100`.

pub mod report;


use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::cleaner::clean_tweet;
use crate::logic::config::ModelConfig;
use crate::logic::dataset::{DatasetError, DatasetReader, LabeledTweet};
use crate::logic::model::{ModelKind, ModelManager, Sentiment};

pub use report::{render_bar_chart, render_details, EvaluationReport, ModelScore};

/// Default rows per benchmark run
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Benchmark options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalOptions {
    pub sample_size: usize,
    /// Fixed seed for a reproducible sample; `None` draws from entropy
    pub seed: Option<u64>,
    /// Clean tweets before predicting
    pub clean_text: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: None,
            clean_text: false,
        }
    }
}

/// One scored row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub text: String,
    pub actual: Option<Sentiment>,
    pub predicted: Sentiment,
}

impl EvaluationRecord {
    pub fn is_match(&self) -> bool {
        self.actual == Some(self.predicted)
    }
}

/// Percentage of matches over `total`
pub fn accuracy(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (correct as f64 / total as f64) * 100.0
}

/// Score one manager on a sample
pub fn score_model(manager: &ModelManager, sample: &[LabeledTweet], clean_text: bool) -> ModelScore {
    let records: Vec<EvaluationRecord> = sample
        .iter()
        .map(|row| {
            let text = if clean_text { clean_tweet(&row.text) } else { row.text.clone() };
            let predicted = manager.predict(&text);
            EvaluationRecord { text, actual: row.actual(), predicted }
        })
        .collect();

    let correct = records.iter().filter(|r| r.is_match()).count();
    let total = sample.len();

    ModelScore {
        model: manager.kind(),
        correct,
        total,
        accuracy: accuracy(correct, total),
        degraded: manager.is_degraded(),
        records,
    }
}

/// Score every manager on the same sample
pub fn run(sample: &[LabeledTweet], managers: &[ModelManager], options: &EvalOptions) -> EvaluationReport {
    let models = managers
        .iter()
        .map(|manager| {
            log::info!("Evaluating {}...", manager.kind());
            let score = score_model(manager, sample, options.clean_text);
            log::info!("{}: {:.2}% ({}/{})", score.model, score.accuracy, score.correct, score.total);
            score
        })
        .collect();

    EvaluationReport {
        sample_size: sample.len(),
        seed: options.seed,
        cleaned: options.clean_text,
        generated_at: chrono::Utc::now(),
        models,
    }
}

/// Sample the dataset and benchmark all three strategies.
///
/// A missing dataset file is an error; there is no fallback.
pub fn evaluate(dataset: impl AsRef<Path>, options: &EvalOptions, config: &ModelConfig) -> Result<EvaluationReport, EvalError> {
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let sample = DatasetReader::open(dataset)?.sample(options.sample_size, &mut rng)?;

    let managers: Vec<ModelManager> = ModelKind::ALL
        .iter()
        .map(|&kind| ModelManager::new(kind, config))
        .collect();

    Ok(run(&sample, &managers, options))
}
