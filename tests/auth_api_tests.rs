// SPDX-License-Identifier: MIT

//! Signup, login and token-guard tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_signup_returns_token_and_sanitized_user() {
    let (app, _state, _dir) = common::create_test_app().await;

    let (status, body) = common::request_json(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({
            "name": "Rider Nova",
            "email": "nova@example.com",
            "password": "pedal-fast",
            "contacts": [{"name": "Sam", "phone": "+1-555-222-9901"}],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());

    let user = &body["user"];
    assert_eq!(user["email"], "nova@example.com");
    assert_eq!(user["role"], "user");
    assert_eq!(user["contacts"][0]["name"], "Sam");
    assert!(user["contacts"][0]["id"].as_str().is_some());
    assert!(
        user.get("passwordHash").is_none(),
        "password hash must never be returned"
    );
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let (app, _state, _dir) = common::create_test_app().await;

    for payload in [
        json!({"email": "a@example.com", "password": "x"}),
        json!({"name": "A", "password": "x"}),
        json!({"name": "A", "email": "a@example.com"}),
        json!({"name": "", "email": "a@example.com", "password": "x"}),
    ] {
        let (status, body) =
            common::request_json(&app, "POST", "/api/auth/signup", None, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name, email, password required");
    }
}

#[tokio::test]
async fn test_signup_rejects_malformed_email() {
    let (app, _state, _dir) = common::create_test_app().await;

    let (status, body) = common::request_json(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({"name": "A", "email": "not-an-email", "password": "x"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email address");
}

#[tokio::test]
async fn test_signup_duplicate_email_is_case_insensitive() {
    let (app, _state, _dir) = common::create_test_app().await;
    common::signup(&app, "First", "rider@example.com", "secret1").await;

    let (status, body) = common::request_json(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({"name": "Second", "email": "RIDER@Example.Com", "password": "secret2"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already exists");
}

#[tokio::test]
async fn test_login_roundtrip() {
    let (app, _state, _dir) = common::create_test_app().await;
    common::signup(&app, "Rider", "rider@example.com", "secret").await;

    let (status, body) = common::request_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "rider@example.com", "password": "secret"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());
    assert!(body["user"].get("passwordHash").is_none());

    // The issued token works on a protected route
    let token = body["token"].as_str().unwrap();
    let (status, me) = common::request_json(&app, "GET", "/api/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["user"]["email"], "rider@example.com");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let (app, _state, _dir) = common::create_test_app().await;
    common::signup(&app, "Rider", "rider@example.com", "secret").await;

    let (status, body) = common::request_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "rider@example.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, _) = common::request_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let (app, _state, _dir) = common::create_test_app().await;

    let (status, body) = common::request_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "rider@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and password required");
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _state, _dir) = common::create_test_app().await;

    let (status, body) = common::request_json(&app, "GET", "/api/dashboard", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing token");
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let (app, _state, _dir) = common::create_test_app().await;

    let (status, body) = common::request_json(
        &app,
        "GET",
        "/api/dashboard",
        Some("invalid.token.here"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn test_health_is_public() {
    let (app, _state, _dir) = common::create_test_app().await;

    let (status, body) = common::request_json(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
