//! Dataset Module - Labeled Tweet Corpus
//!
//! Reads the six-column Sentiment140 layout (label code, id, date, query,
//! user, text) and draws uniform samples in a single pass.

pub mod reader;
pub mod record;


use std::path::PathBuf;

use thiserror::Error;

pub use reader::{reservoir_sample, DatasetReader};
pub use record::LabeledTweet;

/// Number of columns per row
pub const COLUMN_COUNT: usize = 6;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset row: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected 6 columns, found {found}")]
    Columns { line: u64, found: usize },

    #[error("line {line}: invalid label code '{value}'")]
    InvalidLabel { line: u64, value: String },

    #[error("requested {requested} rows but the dataset only has {available}")]
    InsufficientRows { requested: usize, available: usize },

    #[error("sample size must be greater than zero")]
    EmptySample,
}
