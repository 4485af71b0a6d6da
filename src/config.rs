//! Configuration management for chatrelay
//!
//! Reads settings from the process environment once at startup and provides
//! typed, validated access to them. The resulting `Config` is immutable and
//! passed explicitly into the application state.

use axum::http::HeaderValue;
use std::fmt;

use crate::error::{AppError, AppResult};

/// Default Groq chat-completions endpoint
const DEFAULT_UPSTREAM_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model identifier sent to the upstream provider
const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Fixed provider/model label reported in chat responses
const DEFAULT_MODEL_LABEL: &str = "groq-llama3";

/// Root configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub cors: CorsConfig,
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
}

fn default_port() -> u16 {
    8000
}

fn default_request_timeout() -> u64 {
    30
}

/// Upstream completion provider configuration
///
/// All fields are private to enforce invariants. Construction goes through
/// `new()` and values are checked by `Config::validate()`. After
/// construction, fields cannot be mutated, ensuring validated data remains
/// valid.
#[derive(Clone)]
pub struct UpstreamConfig {
    url: String,
    api_key: String,
    model: String,
    temperature: f64,
    model_label: String,
}

impl UpstreamConfig {
    pub fn new(
        url: String,
        api_key: String,
        model: String,
        temperature: f64,
        model_label: String,
    ) -> Self {
        Self {
            url,
            api_key,
            model,
            temperature,
            model_label,
        }
    }

    /// Get the chat-completions endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the bearer credential for the upstream provider
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the model identifier sent in completion requests
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the sampling temperature sent in completion requests
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Get the provider/model label reported as `model_used`
    pub fn model_label(&self) -> &str {
        &self.model_label
    }
}

// The credential must never end up in logs, so Debug redacts it.
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("url", &self.url)
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("model_label", &self.model_label)
            .finish()
    }
}

/// Cross-origin policy configuration
///
/// The permissive `*` default preserves the relay's open policy for
/// development use; deployments scope it via `ALLOWED_ORIGINS`.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl CorsConfig {
    /// Whether any origin is allowed
    pub fn is_permissive(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// `API_KEY` is required; everything else has a default. The process
    /// refuses to start when the credential is absent.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// Split out from `from_env` so tests can supply variables without
    /// touching the process environment.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        // Phase 1: Read raw values
        let api_key = get("API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config(
                    "API_KEY is not set. The relay cannot authenticate against the \
                    upstream provider without it."
                        .to_string(),
                )
            })?;

        // Phase 2: Parse typed values (preserves parse error context)
        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| {
                AppError::Config(format!("PORT must be a valid TCP port, got '{}': {}", raw, e))
            })?,
            None => default_port(),
        };

        let request_timeout_seconds = match get("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::Config(format!(
                    "REQUEST_TIMEOUT_SECONDS must be a positive integer, got '{}': {}",
                    raw, e
                ))
            })?,
            None => default_request_timeout(),
        };

        let temperature = match get("UPSTREAM_TEMPERATURE") {
            Some(raw) => raw.parse::<f64>().map_err(|e| {
                AppError::Config(format!(
                    "UPSTREAM_TEMPERATURE must be a number, got '{}': {}",
                    raw, e
                ))
            })?,
            None => 0.7,
        };

        let allowed_origins = match get("ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            None => CorsConfig::default().allowed_origins,
        };

        let config = Config {
            server: ServerConfig {
                host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port,
                request_timeout_seconds,
            },
            upstream: UpstreamConfig::new(
                get("UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
                api_key,
                get("UPSTREAM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                temperature,
                get("MODEL_LABEL").unwrap_or_else(|| DEFAULT_MODEL_LABEL.to_string()),
            ),
            cors: CorsConfig { allowed_origins },
            observability: ObservabilityConfig {
                log_level: get("LOG_LEVEL").unwrap_or_else(default_log_level),
            },
        };

        // Phase 3: Validate parsed config
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration after construction
    ///
    /// Called automatically by `from_env()`, but can also be called
    /// explicitly when constructing Config via other means (e.g., in tests).
    pub fn validate(&self) -> AppResult<()> {
        if self.server.request_timeout_seconds == 0 {
            return Err(AppError::Config(
                "Configuration error: REQUEST_TIMEOUT_SECONDS must be greater than 0".to_string(),
            ));
        }
        if self.server.request_timeout_seconds > 300 {
            return Err(AppError::Config(format!(
                "Configuration error: REQUEST_TIMEOUT_SECONDS cannot exceed 300 seconds (5 minutes), got {}",
                self.server.request_timeout_seconds
            )));
        }

        if self.upstream.api_key.trim().is_empty() {
            return Err(AppError::Config(
                "Configuration error: API_KEY must not be empty".to_string(),
            ));
        }

        if !self.upstream.url.starts_with("http://") && !self.upstream.url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "Configuration error: upstream URL '{}' is invalid. \
                It must start with 'http://' or 'https://'.",
                self.upstream.url
            )));
        }

        if self.upstream.model.trim().is_empty() {
            return Err(AppError::Config(
                "Configuration error: UPSTREAM_MODEL must not be empty".to_string(),
            ));
        }

        // Standard LLM sampling range
        if self.upstream.temperature < 0.0
            || self.upstream.temperature > 2.0
            || self.upstream.temperature.is_nan()
            || self.upstream.temperature.is_infinite()
        {
            return Err(AppError::Config(format!(
                "Configuration error: UPSTREAM_TEMPERATURE {} is invalid. \
                It must be a finite number between 0.0 and 2.0.",
                self.upstream.temperature
            )));
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(AppError::Config(
                "Configuration error: ALLOWED_ORIGINS must name at least one origin \
                (use '*' to allow any)"
                    .to_string(),
            ));
        }
        for origin in &self.cors.allowed_origins {
            if origin == "*" {
                continue;
            }
            if origin.parse::<HeaderValue>().is_err() {
                return Err(AppError::Config(format!(
                    "Configuration error: allowed origin '{}' is not a valid header value",
                    origin
                )));
            }
        }

        Ok(())
    }
}
