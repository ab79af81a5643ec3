use serde::{Deserialize, Serialize};

use crate::logic::model::{Comparison, ModelKind, ModelStatus, Sentiment};

/// `POST /predict` body. Any string is accepted, including empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

/// `POST /predict` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub sentiment: Sentiment,
    /// Placeholder, 0-100
    pub confidence: f64,
    pub model_used: ModelKind,
}

/// `GET /status` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub active_model: ModelKind,
}

/// `GET /compare` response: one label per strategy plus the active model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    #[serde(flatten)]
    pub results: Comparison,
    pub model_used: ModelKind,
}

/// `GET /health` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: i64,
    pub models: Vec<ModelStatus>,
}
