//! Sentiment handlers: status, predict, compare
//!
//! Model inference is CPU-bound and runs on the blocking pool.

use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    Json,
};
use serde::Deserialize;

use sentiment_core::api::{CompareResponse, PredictRequest, PredictResponse, StatusResponse};

use crate::{AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub text: String,
}

/// GET /status
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse { active_model: state.active })
}

/// POST /predict
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(request) = payload?;
    let active = state.active;
    let registry = state.registry.clone();

    let (sentiment, confidence) = tokio::task::spawn_blocking(move || {
        let manager = registry.get(active);
        (manager.predict(&request.text), manager.reported_confidence())
    })
    .await?;

    tracing::debug!("predict via {}: {}", active, sentiment);

    Ok(Json(PredictResponse {
        sentiment,
        confidence,
        model_used: active,
    }))
}

/// GET /compare?text=...
pub async fn compare(
    State(state): State<AppState>,
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> AppResult<Json<CompareResponse>> {
    let Query(CompareQuery { text }) = query?;
    let registry = state.registry.clone();

    let results = tokio::task::spawn_blocking(move || registry.compare(&text)).await?;

    Ok(Json(CompareResponse {
        results,
        model_used: state.active,
    }))
}
