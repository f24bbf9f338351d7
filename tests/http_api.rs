//! Integration tests for cross-cutting HTTP behaviour: health routes, body parsing and
//! rate limiting.

mod common;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, build_test_app, build_test_app_with, build_test_app_with_limit, get, post_json_from, send,
};
use serde_json::json;

#[tokio::test]
async fn health_ready_and_version() {
    let app = build_test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (status, body) = get(&app, "/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "site-cms");
}

#[tokio::test]
async fn malformed_json_is_a_validation_envelope() {
    let app = build_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/gallery")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid JSON body");
}

#[tokio::test]
async fn oversized_body_is_a_413_envelope() {
    let app = build_test_app_with(1_000, 64);
    let body = json!({ "title": "x".repeat(200), "imageUrl": "https://example.com/a.jpg" });
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/gallery")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Payload too large");
}

#[tokio::test]
async fn unknown_routes_get_an_envelope() {
    let app = build_test_app();
    for uri in ["/nope", "/api/unknown", "/api/pages/slug/a/b"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Route not found");
    }
}

#[tokio::test]
async fn non_object_body_is_rejected() {
    let app = build_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/pages")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("[1, 2, 3]"))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "Expected object");
}

#[tokio::test]
async fn contact_form_is_rate_limited_per_client() {
    let app = build_test_app_with_limit(2);
    let body = json!({
        "name": "Test User",
        "email": "test@example.com",
        "subject": "Test Subject",
        "message": "This is a test message"
    });

    assert_eq!(post_json_from(&app, "/api/contact", "10.0.0.1", body.clone()).await, StatusCode::CREATED);
    assert_eq!(post_json_from(&app, "/api/contact", "10.0.0.1", body.clone()).await, StatusCode::CREATED);
    assert_eq!(
        post_json_from(&app, "/api/contact", "10.0.0.1", body.clone()).await,
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(post_json_from(&app, "/api/contact", "10.0.0.2", body).await, StatusCode::CREATED);
}

#[tokio::test]
async fn rate_limit_envelope_and_unlimited_reads() {
    let app = build_test_app_with_limit(1);
    let login = json!({ "email": "nobody@example.com", "password": "password123" });
    assert_eq!(
        post_json_from(&app, "/api/auth/login", "10.0.0.9", login.clone()).await,
        StatusCode::UNAUTHORIZED
    );

    let mut request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(login.to_string()))
        .unwrap();
    request.headers_mut().insert("x-forwarded-for", "10.0.0.9".parse().unwrap());
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Too many requests");

    for _ in 0..3 {
        let (status, _) = get(&app, "/api/gallery").await;
        assert_eq!(status, StatusCode::OK);
    }
}
