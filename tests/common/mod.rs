#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use site_cms::{app, AppState, MemoryStore};

pub const BODY_LIMIT: usize = 1024 * 1024;

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

/// Full router over a fresh in-memory store with a generous rate limit.
pub fn build_test_app() -> TestApp {
    build_test_app_with_limit(1_000)
}

pub fn build_test_app_with_limit(max_requests: usize) -> TestApp {
    build_test_app_with(max_requests, BODY_LIMIT)
}

pub fn build_test_app_with(max_requests: usize, body_limit: usize) -> TestApp {
    let store = MemoryStore::new();
    let state = AppState::new(Arc::new(store.clone()), max_requests, Duration::from_secs(900));
    TestApp {
        router: app(state, body_limit),
        store,
    }
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = send(app, request).await;
    (response.status(), body_json(response).await)
}

pub async fn post_json(app: &TestApp, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = send(app, json_request(Method::POST, uri, &body)).await;
    (response.status(), body_json(response).await)
}

pub async fn put_json(app: &TestApp, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = send(app, json_request(Method::PUT, uri, &body)).await;
    (response.status(), body_json(response).await)
}

pub async fn delete(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;
    (response.status(), body_json(response).await)
}

/// POST from a specific client address via `X-Forwarded-For`.
pub async fn post_json_from(app: &TestApp, uri: &str, client: &str, body: Value) -> StatusCode {
    let mut request = json_request(Method::POST, uri, &body);
    request
        .headers_mut()
        .insert("x-forwarded-for", client.parse().unwrap());
    send(app, request).await.status()
}
