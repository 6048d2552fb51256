//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    fn new(status: &str, message: Option<String>) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            message,
        }
    }
}

/// Liveness
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("UP", None))
}

/// Readiness, including the application store
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let result = state.applications.health().await;
    if result.is_healthy() {
        (StatusCode::OK, Json(HealthResponse::new("UP", None)))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::new("DOWN", result.message)),
        )
    }
}
