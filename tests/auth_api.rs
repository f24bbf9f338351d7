//! Integration tests for login and registration.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, post_json};
use serde_json::json;
use site_cms::model::USER;

fn registration(email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "name": "John Doe",
        "password": "password123",
        "confirmPassword": "password123"
    })
}

#[tokio::test]
async fn register_then_login_returns_user_without_password() {
    let app = build_test_app();

    let (status, body) = post_json(&app, "/api/auth/register", registration("user@example.com")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Registration successful");
    assert_eq!(body["data"]["user"]["email"], "user@example.com");
    assert_eq!(body["data"]["user"]["role"], "admin");
    assert!(body["data"]["user"].get("password").is_none());
    assert!(body["data"]["user"]["createdAt"].is_string());

    let (status, body) = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "user@example.com", "password": "password123" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["user"]["name"], "John Doe");
    assert!(body["data"]["user"].get("password").is_none());
}

#[tokio::test]
async fn duplicate_registration_is_400_and_keeps_one_row() {
    let app = build_test_app();
    let (status, _) = post_json(&app, "/api/auth/register", registration("dup@example.com")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(&app, "/api/auth/register", registration("dup@example.com")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Email already in use");
    assert_eq!(body["message"], "Registration failed");
    assert_eq!(app.store.count(&USER).await, 1);
}

#[tokio::test]
async fn mismatched_passwords_fail_validation() {
    let app = build_test_app();
    let mut body = registration("user@example.com");
    body["confirmPassword"] = json!("different");
    let (status, body) = post_json(&app, "/api/auth/register", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Validation error");
    assert_eq!(body["error"], "Passwords don't match");
    assert_eq!(body["details"][0]["field"], "confirmPassword");
}

#[tokio::test]
async fn unknown_email_and_wrong_password_look_the_same() {
    let app = build_test_app();
    post_json(&app, "/api/auth/register", registration("known@example.com")).await;

    let (unknown_status, unknown) = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "nobody@example.com", "password": "password123" }),
    )
    .await;
    let (wrong_status, wrong) = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "known@example.com", "password": "wrongpassword" }),
    )
    .await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, wrong);
    assert_eq!(unknown["success"], false);
}

#[tokio::test]
async fn malformed_login_is_422() {
    let app = build_test_app();
    let (status, body) = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "invalid", "password": "short" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid email address");
}
