//! Chat relay endpoint handler
//!
//! Handles POST /api/chat: validates the message, forwards it to the
//! upstream completion provider, and reports the reply with latency
//! metadata.

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::middleware::RequestId;

/// Chat request from client
///
/// A missing `message` field deserializes to the empty string so that
/// absent, empty, and whitespace-only messages all take the same
/// validation path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Chat response to client
///
/// Fields are private to enforce construction through `new()`; produced
/// only on successful upstream completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Model's reply text
    reply: String,
    /// Fixed provider/model pairing label
    model_used: String,
    /// Wall-clock duration between request receipt and upstream response
    latency_ms: u64,
}

impl ChatResponse {
    pub fn new(reply: String, model_used: String, latency_ms: u64) -> Self {
        Self {
            reply,
            model_used,
            latency_ms,
        }
    }

    /// Get the reply text
    pub fn reply(&self) -> &str {
        &self.reply
    }

    /// Get the provider/model label
    pub fn model_used(&self) -> &str {
        &self.model_used
    }

    /// Get the measured latency in milliseconds
    pub fn latency_ms(&self) -> u64 {
        self.latency_ms
    }
}

/// POST /api/chat handler
///
/// Single linear flow: validate, forward to the upstream provider, map the
/// outcome. Exactly one outbound call per invocation; failures are
/// translated to JSON error bodies at the `AppError` boundary.
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    tracing::debug!(
        request_id = %request_id,
        message_length = request.message().len(),
        "Received chat request"
    );

    // The only validation performed: reject blank messages before any
    // upstream call is made.
    if request.message().trim().is_empty() {
        return Err(AppError::Validation("Empty message".to_string()));
    }

    let start = Instant::now();

    // The message is forwarded untrimmed; trimming applies to the emptiness
    // check only.
    let reply = state.client().complete(request.message()).await?;

    let latency_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        request_id = %request_id,
        latency_ms = latency_ms,
        reply_length = reply.len(),
        "Chat request completed"
    );

    Ok(Json(ChatResponse::new(
        reply,
        state.config().upstream.model_label().to_string(),
        latency_ms,
    )))
}
