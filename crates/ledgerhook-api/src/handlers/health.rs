//! Health check handlers for service monitoring.
//!
//! Provides liveness, readiness, and health endpoints for orchestration
//! systems like Kubernetes. The service holds no connections to external
//! systems, so all three probes reduce to whether the HTTP layer answers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service health status
    pub status: &'static str,
    /// Timestamp when health check was performed
    pub timestamp: DateTime<Utc>,
    /// Service version information
    pub version: &'static str,
}

/// Health check endpoint handler.
///
/// This endpoint is designed to be called frequently by orchestration
/// systems and load balancers, so it avoids expensive operations.
#[instrument(name = "health_check")]
pub async fn health_check() -> Response {
    debug!("Performing health check");

    let response = HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Readiness check endpoint for Kubernetes probes.
///
/// The service becomes ready as soon as it can serve requests; there are
/// no external dependencies to wait for.
#[instrument(name = "readiness_check")]
pub async fn readiness_check() -> Response {
    health_check().await
}

/// Liveness check endpoint for Kubernetes probes.
///
/// Returns a simple response indicating the service process is alive.
#[instrument(name = "liveness_check")]
pub async fn liveness_check() -> Response {
    debug!("Performing liveness check");

    let response = serde_json::json!({
        "status": "alive",
        "timestamp": Utc::now(),
        "service": "ledgerhook-api"
    });

    (StatusCode::OK, Json(response)).into_response()
}
