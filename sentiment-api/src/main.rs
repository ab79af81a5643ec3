//! Tweet Sentiment API Server
//!
//! Serves the configured sentiment model over HTTP and compares all three
//! strategies on demand.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   SENTIMENT API                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐       ┌────────────────────────────────┐  │
//! │  │  Router   │──────►│  ModelRegistry (lazy, shared)  │  │
//! │  │  (Axum)   │       │  vader · textblob · roberta    │  │
//! │  └───────────┘       └────────────────────────────────┘  │
//! │        ▲                       ▲                         │
//! │        │                spawn_blocking                   │
//! │   /status /predict /compare /health                      │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;


use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sentiment_core::{ConfigSource, ModelKind, ModelRegistry, SentimentConfig};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "sentiment_api=debug,sentiment_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Tweet Sentiment API starting ({})...", config.environment);

    let loaded = SentimentConfig::load(&config.config_path)?;
    if loaded.source == ConfigSource::Default && config.is_production() {
        tracing::warn!("No model config at {}, serving defaults", config.config_path.display());
    }

    let state = AppState::new(&loaded.config);

    // Build the active model up front so the first request is not slow
    let warm = state.clone();
    let status = tokio::task::spawn_blocking(move || warm.registry.get(warm.active).status()).await?;
    match &status.degraded_reason {
        Some(reason) => tracing::warn!("Active model {} is degraded: {}", status.model, reason),
        None => tracing::info!("Active model: {}", status.model),
    }

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Fixed for the process lifetime
    pub active: ModelKind,
    pub registry: Arc<ModelRegistry>,
}

impl AppState {
    pub fn new(settings: &SentimentConfig) -> Self {
        Self {
            active: settings.active_model(),
            registry: Arc::new(ModelRegistry::new(settings.model_config.clone())),
        }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/status", get(handlers::sentiment::status))
        .route("/predict", post(handlers::sentiment::predict))
        .route("/compare", get(handlers::sentiment::compare))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
