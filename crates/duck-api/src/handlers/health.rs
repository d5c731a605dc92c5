//! Health check handlers
//!
//! Endpoints for liveness and readiness checks.

use std::time::Duration;

use axum::{extract::State, http::StatusCode, Json};
use duck_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

const READINESS_TIMEOUT: Duration = Duration::from_secs(2);

/// Basic health check (liveness)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with database connectivity
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = matches!(
        tokio::time::timeout(READINESS_TIMEOUT, duck_db::check_connection(state.pool())).await,
        Ok(Ok(()))
    );

    if !db_healthy {
        tracing::warn!("Readiness check failed: database unreachable");
    }

    let response = ReadinessResponse::ready(db_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
