//! Upstream failure mapping tests for POST /api/chat
//!
//! Upstream non-2xx responses are forwarded verbatim (status and body);
//! transport-level failures surface as HTTP 500 with the underlying
//! failure message.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chatrelay::{
    config::{Config, CorsConfig, ObservabilityConfig, ServerConfig, UpstreamConfig},
    handlers::{self, AppState},
};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_config(upstream_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_seconds: 5,
        },
        upstream: UpstreamConfig::new(
            upstream_url.to_string(),
            "test-key".to_string(),
            "llama-3.1-8b-instant".to_string(),
            0.7,
            "groq-llama3".to_string(),
        ),
        cors: CorsConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

fn create_test_app(upstream_url: &str) -> Router {
    let config = create_test_config(upstream_url);
    let state = AppState::new(config).expect("AppState::new should succeed");
    handlers::router(state)
}

fn chat_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"message": "hello"}"#))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).expect("error body should be JSON")
}

#[tokio::test]
async fn test_upstream_429_is_forwarded_with_body() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(serde_json::json!({"error": "rate limited"})),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let app = create_test_app(&format!("{}/openai/v1/chat/completions", upstream.uri()));

    let response = app.oneshot(chat_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = response_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({"detail": {"error": "rate limited"}}),
        "upstream error body should be forwarded verbatim"
    );
}

#[tokio::test]
async fn test_upstream_non_json_error_body_is_forwarded_as_text() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = create_test_app(&format!("{}/openai/v1/chat/completions", upstream.uri()));

    let response = app.oneshot(chat_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = response_json(response).await;
    assert_eq!(json, serde_json::json!({"detail": "service unavailable"}));
}

#[tokio::test]
async fn test_unreachable_upstream_returns_500_with_failure_message() {
    // Nothing listens on port 1; the call fails at the transport layer.
    let app = create_test_app("http://127.0.0.1:1/openai/v1/chat/completions");

    let response = app.oneshot(chat_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    let detail = json
        .get("detail")
        .and_then(|value| value.as_str())
        .expect("detail should be a string for transport failures");
    assert!(
        detail.contains("refused") || detail.contains("error sending request"),
        "detail should carry the underlying failure message, got: {}",
        detail
    );
}

#[tokio::test]
async fn test_upstream_success_without_choices_returns_500() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [],
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = create_test_app(&format!("{}/openai/v1/chat/completions", upstream.uri()));

    let response = app.oneshot(chat_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    let detail = json
        .get("detail")
        .and_then(|value| value.as_str())
        .expect("detail should be a string");
    assert!(
        detail.contains("choices"),
        "detail should explain the malformed upstream body, got: {}",
        detail
    );
}

#[tokio::test]
async fn test_upstream_malformed_success_body_returns_500() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = create_test_app(&format!("{}/openai/v1/chat/completions", upstream.uri()));

    let response = app.oneshot(chat_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
