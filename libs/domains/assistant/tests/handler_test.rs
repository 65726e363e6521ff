//! Handler tests for the assistant router

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use core_ai::{AiError, AiResult, ContentGenerator};
use domain_assistant::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

struct Echo;

#[async_trait]
impl ContentGenerator for Echo {
    async fn generate(&self, prompt: &str) -> AiResult<String> {
        Ok(format!("summary of {} chars", prompt.len()))
    }
}

struct Failing;

#[async_trait]
impl ContentGenerator for Failing {
    async fn generate(&self, _prompt: &str) -> AiResult<String> {
        Err(AiError::EmptyResponse)
    }
}

async fn post(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/summarize")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_summarize() {
    let app = handlers::router(AssistantService::new(Some(Arc::new(Echo))));
    let (status, body) = post(app, json!({ "text_to_summarize": "abc" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"]["summary"].as_str().unwrap().starts_with("summary of"));
}

#[tokio::test]
async fn test_missing_text() {
    let app = handlers::router(AssistantService::new(Some(Arc::new(Echo))));
    let (status, _) = post(app.clone(), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(app, json!({ "textToSummarize": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Text to summarize is empty or invalid.");
}

#[tokio::test]
async fn test_provider_failure_and_missing_key() {
    let app = handlers::router(AssistantService::new(Some(Arc::new(Failing))));
    let (status, _) = post(app, json!({ "text_to_summarize": "abc" })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let app = handlers::router(AssistantService::new(None));
    let (status, _) = post(app, json!({ "text_to_summarize": "abc" })).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
