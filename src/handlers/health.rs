//! Health check endpoint
//!
//! Provides a simple liveness check for monitoring and load balancers.

use axum::{Json, http::StatusCode};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Service status
    pub status: &'static str,
}

/// GET / handler
///
/// Returns 200 with a static status body regardless of upstream
/// availability.
pub async fn handler() -> (StatusCode, Json<StatusResponse>) {
    (StatusCode::OK, Json(StatusResponse { status: "running" }))
}
