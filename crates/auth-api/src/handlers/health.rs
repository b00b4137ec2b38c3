//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use auth_service::{HealthResponse, ReadinessResponse};
use axum::{extract::State, http::StatusCode, Json};
use tracing::warn;

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with credential store health
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = match state.service_context().user_repo().health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Credential store health check failed");
            false
        }
    };

    let response = ReadinessResponse::ready(db_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
