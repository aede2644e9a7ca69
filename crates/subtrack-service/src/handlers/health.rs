//! Health check handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Storage backend status.
    pub database: String,
}

/// Health check endpoint. Answers 503 when the store cannot be reached.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let (status, database) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed to reach store");
            (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
        }
    };

    let overall = if status.is_success() { "ok" } else { "degraded" };

    (
        status,
        Json(HealthResponse {
            status: overall.to_string(),
            service: "subtrack".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database.to_string(),
        }),
    )
}
