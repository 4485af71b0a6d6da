//! Upstream completion provider client
//!
//! Wraps a shared `reqwest::Client` and speaks the OpenAI-compatible
//! chat-completions contract with bearer-token authorization. One outbound
//! call per invocation, no retries.

use axum::http::StatusCode;
use std::time::Duration;

use crate::config::Config;
use crate::error::{AppError, AppResult};

mod types;

pub use types::{CompletionRequest, CompletionResponse, Message};

/// Client for the upstream chat-completion endpoint
///
/// Built once at startup so the connection pool and the configured request
/// timeout are shared across all in-flight requests.
pub struct CompletionClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f64,
}

impl CompletionClient {
    /// Create a client from validated configuration
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::Config(format!("Failed to build upstream HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            url: config.upstream.url().to_string(),
            api_key: config.upstream.api_key().to_string(),
            model: config.upstream.model().to_string(),
            temperature: config.upstream.temperature(),
        })
    }

    /// Forward a single user message and return the model's reply text
    ///
    /// Failure mapping follows the relay's error taxonomy: a non-2xx status
    /// becomes `Upstream` carrying the provider's status and error body
    /// verbatim; send or decode failures become `Transport` carrying the
    /// underlying failure message chain.
    pub async fn complete(&self, message: &str) -> AppResult<String> {
        let payload = CompletionRequest::user_turn(&self.model, message, self.temperature);

        tracing::debug!(
            url = %self.url,
            model = %self.model,
            message_length = message.len(),
            "Sending completion request upstream"
        );

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Transport(error_chain(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("failed to read upstream error body: {}", e));
            // Forward the provider's error body as parsed JSON when it is
            // JSON, as a raw string otherwise.
            let detail = serde_json::from_str(&text)
                .unwrap_or_else(|_| serde_json::Value::String(text));

            return Err(AppError::Upstream {
                status: StatusCode::from_u16(status.as_u16())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                detail,
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Transport(error_chain(&e)))?;

        completion.into_reply().ok_or_else(|| {
            AppError::Transport("upstream response contained no completion choices".to_string())
        })
    }
}

/// Render an error with its full source chain
///
/// `reqwest::Error::to_string()` alone hides the root cause (a connection
/// refusal appears only in the source chain), and the relay surfaces the
/// underlying failure message to the caller.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
