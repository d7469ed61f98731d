#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use anidex_api::config::ServerConfig;
use anidex_api::router::build_app_router;
use anidex_api::state::AppState;
use anidex_db::{Catalog, StoreOptions};
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

/// Build a test `ServerConfig` pointing at `data_dir`.
pub fn test_config(data_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        data_dir: data_dir.to_path_buf(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store: StoreOptions::default(),
    }
}

/// Build the full application router over `data_dir`, creating any missing
/// collection file as an empty array.
pub async fn build_test_app(data_dir: &Path) -> Router {
    let config = test_config(data_dir);
    let catalog = Catalog::open(data_dir, config.store);
    catalog.bootstrap().await.unwrap();

    let state = AppState {
        catalog: Arc::new(catalog),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A fresh data directory seeded with `(file, json)` pairs.
pub fn data_dir(seeds: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (file, json) in seeds {
        std::fs::write(dir.path().join(file), json).unwrap();
    }
    dir
}

pub fn read_file(dir: &TempDir, file: &str) -> String {
    std::fs::read_to_string(dir.path().join(file)).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}
