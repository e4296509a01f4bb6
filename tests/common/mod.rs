// SPDX-License-Identifier: MIT

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use bikeguard::config::Config;
use bikeguard::db::Store;
use bikeguard::notify::Notifier;
use bikeguard::routes::create_router;
use bikeguard::AppState;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Create a test app backed by a JSON store in a fresh temp directory.
///
/// Returns the temp dir guard as well: dropping it deletes the store file.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = Config::test_default();

    let store = Store::open(dir.path().join("db.json"))
        .await
        .expect("Failed to open test store");

    let state = Arc::new(AppState {
        config,
        store,
        notifier: Notifier::disabled(),
    });

    (create_router(state.clone()), state, dir)
}

/// Send a JSON request and return status plus parsed body.
///
/// Non-JSON or empty bodies come back as `Value::Null`.
#[allow(dead_code)]
pub async fn request_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request should not fail at the transport level");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

/// Sign up a fresh user and return their bearer token and user object.
#[allow(dead_code)]
pub async fn signup(
    app: &axum::Router,
    name: &str,
    email: &str,
    password: &str,
) -> (String, serde_json::Value) {
    let (status, body) = request_json(
        app,
        "POST",
        "/api/auth/signup",
        None,
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "signup failed: {}", body);

    let token = body["token"].as_str().expect("token in response").to_string();
    (token, body["user"].clone())
}
