//! Shared helpers for API integration tests.
//!
//! Each test gets its own temp directory for the catalog snapshot and
//! the uploads directory, and drives the full application router
//! (middleware included) through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use charcut_api::config::{Environment, ServerConfig};
use charcut_api::router::build_app_router;
use charcut_api::state::AppState;
use charcut_core::assets::AssetStore;
use charcut_core::catalog::CatalogStore;

/// Host header attached to every test request; asset URLs in responses
/// are derived from it in development mode.
pub const TEST_HOST: &str = "localhost:3001";

/// Build a test `ServerConfig` rooted in `dir`.
pub fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        environment: Environment::Development,
        public_base_url: None,
        menu_file: dir.path().join("menu-items.json"),
        uploads_dir: dir.path().join("uploads"),
    }
}

/// Build the full application router from `config`.
///
/// This mirrors the construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, body limit,
/// timeout, tracing, panic recovery) that production uses. Building a
/// second app from the same config simulates a process restart against
/// the same snapshot and uploads directory.
pub fn build_test_app(config: &ServerConfig) -> Router {
    let catalog = CatalogStore::load(config.menu_file.clone());
    let assets = AssetStore::open(config.uploads_dir.clone()).expect("uploads directory");

    let state = AppState {
        catalog: Arc::new(Mutex::new(catalog)),
        assets: Arc::new(assets),
        config: Arc::new(config.clone()),
    };

    build_app_router(state, config)
}

/// Issue a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("host", TEST_HOST)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("host", TEST_HOST)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a DELETE request.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("host", TEST_HOST)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a POST request with a single-file multipart body.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    field: &str,
    filename: &str,
    content_type: &str,
    content: &[u8],
) -> Response<Body> {
    let boundary = "charcut-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("host", TEST_HOST)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("response body should collect")
        .to_bytes()
        .to_vec()
}
