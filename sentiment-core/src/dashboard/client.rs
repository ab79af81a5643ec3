//! Sentiment API Client
//!
//! HTTP client the dashboard uses to reach the sentiment server.

use std::time::Duration;

use thiserror::Error;

use crate::api::{CompareResponse, PredictRequest, PredictResponse, StatusResponse};
use crate::constants;

/// Server location and request timeout
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: constants::get_api_url(),
            timeout_seconds: constants::DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

/// Sentiment API client
pub struct SentimentClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl SentimentClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self { config, http_client })
    }

    pub fn server_url(&self) -> &str {
        &self.config.server_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.server_url.trim_end_matches('/'), path)
    }

    /// `GET /status`
    pub async fn status(&self) -> Result<StatusResponse, ClientError> {
        let response = self.http_client
            .get(self.url("/status"))
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        Self::parse(response).await
    }

    /// `POST /predict`
    pub async fn predict(&self, text: &str) -> Result<PredictResponse, ClientError> {
        let request = PredictRequest { text: text.to_string() };

        log::debug!("POST {} ({} chars)", self.url("/predict"), text.len());

        let response = self.http_client
            .post(self.url("/predict"))
            .json(&request)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        Self::parse(response).await
    }

    /// `GET /compare?text=...`
    pub async fn compare(&self, text: &str) -> Result<CompareResponse, ClientError> {
        let response = self.http_client
            .get(self.url("/compare"))
            .query(&[("text", text)])
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        Self::parse(response).await
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        if response.status().is_success() {
            response.json().await
                .map_err(|e| ClientError::Parse(e.to_string()))
        } else {
            let status = response.status().as_u16();
            log::warn!("Server responded with status {}", status);
            Err(ClientError::Server(status))
        }
    }
}

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Nothing listening at the server URL
    #[error("Backend offline: {0}")]
    Offline(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Server error: {0}")]
    Server(u16),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Network error: {0}")]
    Network(String),
}

impl ClientError {
    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Offline(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }

    /// Message shown to the dashboard user
    pub fn user_message(&self, server_url: &str) -> String {
        match self {
            Self::Offline(_) => format!(
                "❌ Backend Offline: no sentiment API is running at {}.\n   Start it with: cargo run -p sentiment-api",
                server_url
            ),
            Self::Timeout => "⌛ Timeout: The API took too long to respond.".to_string(),
            Self::Server(code) => format!("API Error: Status {}", code),
            other => format!("⚠️ An unexpected error occurred: {}", other),
        }
    }
}
