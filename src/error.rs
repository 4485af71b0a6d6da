//! Error types for chatrelay
//!
//! All errors implement `IntoResponse` for Axum handlers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Upstream returned {status}: {detail}")]
    Upstream { status: StatusCode, detail: Value },

    #[error("Upstream call failed: {0}")]
    Transport(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Single translation boundary: every runtime failure is logged here
        // before it becomes a client-visible JSON body.
        let (status, detail) = match self {
            Self::Validation(msg) => {
                tracing::warn!(detail = %msg, "Rejected invalid request");
                (StatusCode::BAD_REQUEST, Value::String(msg))
            }
            Self::Upstream { status, detail } => {
                tracing::error!(status = %status, detail = %detail, "Upstream call failed");
                (status, detail)
            }
            Self::Transport(msg) => {
                tracing::error!(detail = %msg, "Transport failure reaching upstream");
                (StatusCode::INTERNAL_SERVER_ERROR, Value::String(msg))
            }
            Self::Config(msg) => {
                tracing::error!(detail = %msg, "Configuration error surfaced at runtime");
                (StatusCode::INTERNAL_SERVER_ERROR, Value::String(msg))
            }
        };

        let body = Json(serde_json::json!({
            "detail": detail,
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
