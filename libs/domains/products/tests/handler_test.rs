//! Handler tests for Products domain
//!
//! Drive the router with in-memory storage, image files and search:
//! - JSON CRUD envelopes and status codes
//! - multipart image upload and removal

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use search::{InMemorySearchIndex, SearchMirror};
use serde_json::{Value, json};
use tower::ServiceExt;

const BOUNDARY: &str = "----product-images-boundary";

struct Fixture {
    app: Router,
    storage: InMemoryImageStorage,
    index: InMemorySearchIndex,
}

fn setup() -> Fixture {
    setup_with_upload_limit(handlers::DEFAULT_UPLOAD_LIMIT)
}

fn setup_with_upload_limit(upload_limit: usize) -> Fixture {
    let index = InMemorySearchIndex::new();
    let storage = InMemoryImageStorage::new();
    let service = ProductService::new(
        InMemoryProductRepository::new(),
        SearchMirror::new(Arc::new(index.clone()), SEARCH_INDEX),
        Arc::new(storage.clone()),
    );
    Fixture {
        app: handlers::router_with_upload_limit(service, upload_limit),
        storage,
        index,
    }
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
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
    read_json(app.clone().oneshot(request).await.unwrap()).await
}

/// `(field, file name, content type, bytes)`
fn multipart_body(files: &[(&str, &str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, file_name, content_type, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(app: &Router, id: &str, files: &[(&str, &str, &str, &[u8])]) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/{id}/images"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(files)))
        .unwrap();
    read_json(app.clone().oneshot(request).await.unwrap()).await
}

async fn create_tee(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/",
        Some(json!({ "name": "Tee", "category": "apparel", "price": 19.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_and_get_product() {
    let f = setup();
    let id = create_tee(&f.app).await;

    let (status, body) = send(&f.app, "GET", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Tee");
    assert_eq!(body["data"]["images"], json!([]));
    assert_eq!(f.index.len(SEARCH_INDEX).await, 1);
}

#[tokio::test]
async fn test_create_requires_name() {
    let f = setup();
    let (status, body) = send(&f.app, "POST", "/", Some(json!({ "price": 3.0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body.to_string().contains("Product name is required"));
}

#[tokio::test]
async fn test_get_unknown_product() {
    let f = setup();
    let (status, body) = send(
        &f.app,
        "GET",
        "/0190a5a0-0000-7000-8000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.to_string().contains("Product is not found"));

    let (status, _) = send(&f.app, "GET", "/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_by_category() {
    let f = setup();
    create_tee(&f.app).await;
    send(
        &f.app,
        "POST",
        "/",
        Some(json!({ "name": "Mug", "category": "kitchen", "price": 8.0 })),
    )
    .await;

    let (status, body) = send(&f.app, "GET", "/?category=kitchen", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["data"][0]["name"], "Mug");
}

#[tokio::test]
async fn test_upload_and_remove_images() {
    let f = setup();
    let id = create_tee(&f.app).await;

    let (status, body) = upload(
        &f.app,
        &id,
        &[
            ("images", "front.png", "image/png", &b"png-bytes"[..]),
            ("images", "back.jpg", "image/jpeg", &b"jpg-bytes"[..]),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let images: Vec<String> = serde_json::from_value(body["data"]["images"].clone()).unwrap();
    assert_eq!(images.len(), 2);
    assert!(images[0].ends_with("-front.png"));
    assert!(images[1].ends_with("-back.jpg"));
    assert_eq!(f.storage.len().await, 2);

    let (status, body) = send(
        &f.app,
        "DELETE",
        &format!("/{id}/images"),
        Some(json!({ "images": [images[0]] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product image has been deleted");
    assert_eq!(body["data"]["images"], json!([images[1]]));
    assert!(!f.storage.contains(&images[0]).await);
}

#[tokio::test]
async fn test_upload_rejects_non_images() {
    let f = setup();
    let id = create_tee(&f.app).await;

    let (status, body) = upload(
        &f.app,
        &id,
        &[("images", "notes.txt", "text/plain", &b"hello"[..])],
    )
    .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["success"], false);
    assert_eq!(f.storage.len().await, 0);
}

#[tokio::test]
async fn test_upload_above_axum_default_limit() {
    let f = setup();
    let id = create_tee(&f.app).await;
    let photo = vec![0u8; 3 * 1024 * 1024];

    let (status, body) = upload(&f.app, &id, &[("images", "big.png", "image/png", &photo[..])]).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["images"].as_array().unwrap().len(), 1);
    assert_eq!(f.storage.len().await, 1);
}

#[tokio::test]
async fn test_upload_over_limit() {
    let f = setup_with_upload_limit(64 * 1024);
    let id = create_tee(&f.app).await;
    let photo = vec![0u8; 128 * 1024];

    let (status, body) = upload(&f.app, &id, &[("images", "big.png", "image/png", &photo[..])]).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "PAYLOAD_TOO_LARGE");
    assert_eq!(f.storage.len().await, 0);
}

#[tokio::test]
async fn test_upload_without_files() {
    let f = setup();
    let id = create_tee(&f.app).await;

    let (status, _) = upload(&f.app, &id, &[("other", "a.png", "image/png", &b"x"[..])]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_images_requires_selection() {
    let f = setup();
    let id = create_tee(&f.app).await;

    let (status, body) = send(
        &f.app,
        "DELETE",
        &format!("/{id}/images"),
        Some(json!({ "images": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.to_string().contains("Please select the image(s) to be deleted."));
}

#[tokio::test]
async fn test_delete_product() {
    let f = setup();
    let id = create_tee(&f.app).await;

    let (status, body) = send(&f.app, "DELETE", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    assert_eq!(f.index.len(SEARCH_INDEX).await, 0);

    let (status, _) = send(&f.app, "DELETE", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
