//! HTTP request handlers for the chatrelay API

use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppResult;
use crate::middleware::request_id_middleware;
use crate::upstream::CompletionClient;
use std::sync::Arc;

pub mod chat;
pub mod health;

/// Application state shared across all handlers
///
/// Contains configuration and the upstream completion client. All fields are
/// Arc'd for cheap cloning across Axum handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    client: Arc<CompletionClient>,
}

impl AppState {
    /// Create a new AppState from configuration
    pub fn new(config: Config) -> AppResult<Self> {
        let client = CompletionClient::new(&config)?;

        Ok(Self {
            config: Arc::new(config),
            client: Arc::new(client),
        })
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get reference to the upstream completion client
    pub fn client(&self) -> &CompletionClient {
        &self.client
    }
}

/// Build the application router with all routes and middleware layers
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.config());

    Router::new()
        .route("/", get(health::handler))
        .route("/api/chat", post(chat::handler))
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Derive the CORS layer from configuration
///
/// `*` in the allowed-origins list means any origin; otherwise only the
/// listed origins are allowed. Origin values were validated at config load.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors.is_permissive() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
