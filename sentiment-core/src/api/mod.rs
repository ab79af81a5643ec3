//! API Module - HTTP Wire Types
//!
//! Request and response bodies shared by the server and the dashboard client.

pub mod types;

pub use types::{CompareResponse, HealthResponse, PredictRequest, PredictResponse, StatusResponse};
