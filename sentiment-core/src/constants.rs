//! Central Configuration Constants
//!
//! Single source of truth for defaults shared by the library and binaries.

/// Default model config file
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Default labeled dataset (Sentiment140 layout)
pub const DEFAULT_DATASET_PATH: &str = "data/sentiment140.csv";

/// Default API server URL used by the dashboard
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Dashboard request timeout (seconds)
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 15;

/// Lexicon decision threshold on the compound score
pub const DEFAULT_LEXICON_THRESHOLD: f64 = 0.05;

/// Pattern decision threshold on polarity
pub const DEFAULT_PATTERN_THRESHOLD: f64 = 0.0;

/// Default pattern sentiment lexicon
pub const DEFAULT_PATTERN_LEXICON: &str = "models/en-sentiment.xml";

/// Default transformer checkpoint
pub const DEFAULT_TRANSFORMER_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment";

/// Transformer class treated as positive (3-class: negative, neutral, positive)
pub const DEFAULT_POSITIVE_LABEL: &str = "LABEL_2";

/// Transformer max input tokens
pub const DEFAULT_MAX_LENGTH: usize = 512;

/// Placeholder confidence reported for the transformer
pub const TRANSFORMER_PLACEHOLDER_CONFIDENCE: f64 = 85.0;

/// Confidence reported for the rule-based strategies
pub const RULE_BASED_CONFIDENCE: f64 = 100.0;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model config path from environment or use default
pub fn get_config_path() -> String {
    std::env::var("SENTIMENT_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Get API server URL from environment or use default
pub fn get_api_url() -> String {
    std::env::var("SENTIMENT_API_URL")
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}
