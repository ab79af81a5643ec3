//! Health check handler

use axum::{extract::State, Json};
use sentiment_core::api::HealthResponse;
use sentiment_core::constants;

use crate::AppState;

/// Liveness plus the load state of every model built so far
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: constants::APP_VERSION.to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        models: state.registry.statuses(),
    })
}
