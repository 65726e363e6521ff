//! Handler tests for Users domain
//!
//! Both routers share one service, mounted the way the binary mounts them.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use search::{InMemorySearchIndex, SearchMirror};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> (Router, InMemorySearchIndex) {
    let index = InMemorySearchIndex::new();
    let service = UserService::new(
        InMemoryUserRepository::new(),
        SearchMirror::new(Arc::new(index.clone()), SEARCH_INDEX),
    );
    let app = Router::new()
        .nest("/users", handlers::router(service.clone()))
        .nest("/auth", handlers::auth_router(service));
    (app, index)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_ana(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/users",
        Some(json!({
            "name": "Ana",
            "username": "ana",
            "email": "ana@example.com",
            "password": "sup3r-secret",
            "role": "STORE ADMIN"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_never_returns_hash() {
    let (app, index) = app();
    let id = create_ana(&app).await;

    let (status, body) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "STORE_ADMIN");
    assert_eq!(body["data"]["status"], "ACTIVE");
    assert!(!body.to_string().contains("password"));

    let doc = index.document(SEARCH_INDEX, &id).await.unwrap();
    assert!(!doc.to_string().contains("argon2"));
}

#[tokio::test]
async fn test_create_validation_and_conflict() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({ "name": "Bob", "username": "bob", "email": "bob@example.com", "password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.to_string().contains("Password must be at least 8 characters"));

    create_ana(&app).await;
    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({
            "name": "Other",
            "username": "other",
            "email": "ana@example.com",
            "password": "another-pass"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email is already registered");
}

#[tokio::test]
async fn test_login() {
    let (app, _) = app();
    create_ana(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        Some(json!({ "email": "ana@example.com", "password": "sup3r-secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "ana");

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        Some(json!({ "email": "ana@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        "Unauthorized, perhaps you need check your credentials"
    );
}

#[tokio::test]
async fn test_change_password_flow() {
    let (app, _) = app();
    let id = create_ana(&app).await;
    let uri = format!("/users/{id}/change-password");

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!({
            "old_password": "sup3r-secret",
            "new_password": "sup3r-secret",
            "confirm_password": "sup3r-secret"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "New password cannot be the same as your old password."
    );

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(json!({
            "old_password": "not-the-password",
            "new_password": "brand-new-pass",
            "confirm_password": "brand-new-pass"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(json!({ "old_password": "sup3r-secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(json!({
            "old_password": "sup3r-secret",
            "new_password": "brand-new-pass",
            "confirm_password": "brand-new-pass"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        Some(json!({ "email": "ana@example.com", "password": "brand-new-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_list_delete() {
    let (app, _) = app();
    let id = create_ana(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/users/{id}"),
        Some(json!({
            "name": "Ana B",
            "username": "ana",
            "email": "ana@example.com",
            "role": "ADMIN",
            "status": "ACTIVE"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "ADMIN");

    let (status, body) = send(&app, "GET", "/users?role=ADMIN", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);

    let (status, _) = send(&app, "DELETE", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
