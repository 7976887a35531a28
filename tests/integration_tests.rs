//! Integration tests for the word explanation service.
//!
//! These drive the full axum router (CORS, validation, retry loop, error
//! mapping) with a scripted provider standing in for the model.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use word_explainer::connector::api::build_router;
use word_explainer::{Container, HttpServerConfig, RetryPolicy, ScriptedExplanationProvider};

fn app_with(provider: Arc<ScriptedExplanationProvider>, max_attempts: u32) -> Router {
    app_with_token(provider, max_attempts, CancellationToken::new())
}

fn app_with_token(
    provider: Arc<ScriptedExplanationProvider>,
    max_attempts: u32,
    shutdown: CancellationToken,
) -> Router {
    let container = Container::with_provider(provider, RetryPolicy::new(max_attempts));
    build_router(Arc::new(container), &HttpServerConfig::default(), shutdown).expect("router")
}

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/explain")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .expect("request")
}

fn app_with_origins(origins: &[&str]) -> Router {
    let container = Container::with_provider(
        Arc::new(ScriptedExplanationProvider::always("x")),
        RetryPolicy::new(1),
    );
    let config = HttpServerConfig {
        cors_origins: origins.iter().map(|o| o.to_string()).collect(),
        ..Default::default()
    };
    build_router(Arc::new(container), &config, CancellationToken::new()).expect("router")
}

fn post_explain(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/explain")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request")
}

async fn body_json(resp: Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_first_answer_is_returned() {
    let provider = Arc::new(ScriptedExplanationProvider::always(
        "lasting for a very short time",
    ));
    let app = app_with(provider.clone(), 10_000);

    let resp = app
        .oneshot(post_explain(
            json!({"word": "ephemeral", "context": "Her fame was ephemeral."}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"explanation": "lasting for a very short time"})
    );
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_empty_answers_are_retried() {
    let provider = Arc::new(
        ScriptedExplanationProvider::new()
            .then_empty(3)
            .then_text("short-lived"),
    );
    let app = app_with(provider.clone(), 10_000);

    let resp = app
        .oneshot(post_explain(
            json!({"word": "ephemeral", "context": "Her fame was ephemeral."}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"explanation": "short-lived"}));
    assert_eq!(provider.calls(), 4);
}

/// Exhausting the bound is reported as success with an empty explanation,
/// not as an error.
#[tokio::test]
async fn test_exhausted_attempts_return_empty_success() {
    let provider = Arc::new(ScriptedExplanationProvider::always(""));
    let app = app_with(provider.clone(), 10_000);

    let resp = app
        .oneshot(post_explain(
            json!({"word": "ephemeral", "context": "Her fame was ephemeral."}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"explanation": ""}));
    assert_eq!(provider.calls(), 10_000);
}

#[tokio::test]
async fn test_missing_word_is_rejected_before_provider() {
    let provider = Arc::new(ScriptedExplanationProvider::always("unused"));
    let app = app_with(provider.clone(), 10_000);

    let resp = app
        .oneshot(post_explain(json!({"context": "Her fame was ephemeral."}).to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("word"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_missing_context_is_rejected_before_provider() {
    let provider = Arc::new(ScriptedExplanationProvider::always("unused"));
    let app = app_with(provider.clone(), 10_000);

    let resp = app
        .oneshot(post_explain(json!({"word": "ephemeral"}).to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("context"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_wrong_types_and_bad_json_are_rejected() {
    let provider = Arc::new(ScriptedExplanationProvider::always("unused"));

    for body in [
        json!({"word": 7, "context": "x"}).to_string(),
        json!({"word": "x", "context": ["x"]}).to_string(),
        "{not json".to_string(),
    ] {
        let resp = app_with(provider.clone(), 10_000)
            .oneshot(post_explain(body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_provider_failure_is_a_server_error() {
    let provider = Arc::new(
        ScriptedExplanationProvider::new()
            .then_empty(1)
            .then_error("connection refused"),
    );
    let app = app_with(provider.clone(), 10_000);

    let resp = app
        .oneshot(post_explain(
            json!({"word": "ephemeral", "context": "Her fame was ephemeral."}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await,
        json!({"detail": "Internal Server Error"})
    );
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_shutdown_cancels_retry_loop() {
    let provider = Arc::new(ScriptedExplanationProvider::always("unused"));
    let shutdown = CancellationToken::new();
    shutdown.cancel();
    let app = app_with_token(provider.clone(), 10_000, shutdown);

    let resp = app
        .oneshot(post_explain(
            json!({"word": "ephemeral", "context": "Her fame was ephemeral."}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin_with_credentials() {
    let app = app_with(Arc::new(ScriptedExplanationProvider::always("x")), 1);

    let resp = app.oneshot(preflight("http://vocab.example")).await.unwrap();

    assert!(resp.status().is_success());
    let headers = resp.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://vocab.example"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
}

#[tokio::test]
async fn test_cors_restricted_origin_is_not_echoed() {
    let app = app_with_origins(&["http://localhost:3000"]);

    let resp = app
        .clone()
        .oneshot(preflight("http://localhost:3000"))
        .await
        .unwrap();
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );

    let resp = app.oneshot(preflight("http://evil.example")).await.unwrap();
    assert!(resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_cors_wildcard_origin_allows_any() {
    let app = app_with_origins(&["*"]);

    let resp = app.oneshot(preflight("http://vocab.example")).await.unwrap();

    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://vocab.example"
    );
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn test_health_reports_provider() {
    let app = app_with(Arc::new(ScriptedExplanationProvider::always("x")), 1);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["provider"], "scripted");
}
