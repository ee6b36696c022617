use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::error::RoomQError;
use crate::state::AppState;

/// Health response structure
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub queue: String,
    pub timestamp: String,
}

/// Health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health - Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let queue_status = match state.controller.get_backend().await {
        Ok(_) => "running",
        Err(RoomQError::QueueStopped) => "stopped",
        Err(e) => {
            tracing::warn!(error = %e, "Status endpoint unreachable");
            "unreachable"
        }
    };

    let overall_status = if queue_status == "running" {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: overall_status.to_string(),
        queue: queue_status.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
