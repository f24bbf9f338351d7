//! Integration tests for the site configuration singleton.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, get, put_json};
use serde_json::json;
use site_cms::model::SITE_CONFIG;

#[tokio::test]
async fn get_creates_defaults_once() {
    let app = build_test_app();
    let (status, body) = get(&app, "/api/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Site configuration fetched successfully");
    assert_eq!(body["data"]["id"], "default");
    assert_eq!(body["data"]["siteName"], "Presentation Site");
    assert_eq!(body["data"]["heroButtonStyle"], "filled");
    assert_eq!(body["data"]["galleryBgColor"], "#f8fafc");

    let (_, again) = get(&app, "/api/config").await;
    assert_eq!(again["data"]["createdAt"], body["data"]["createdAt"]);
    assert_eq!(app.store.count(&SITE_CONFIG).await, 1);
}

#[tokio::test]
async fn put_updates_supplied_fields_only() {
    let app = build_test_app();
    let (status, body) = put_json(
        &app,
        "/api/config",
        json!({ "siteName": "My Studio", "heroBgColor": "#112233", "theme": "dark" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Site configuration updated successfully");
    assert_eq!(body["data"]["siteName"], "My Studio");
    assert_eq!(body["data"]["heroBgColor"], "#112233");
    assert_eq!(body["data"]["theme"], "dark");
    assert_eq!(body["data"]["footerTextColor"], "#ffffff");
    assert_eq!(app.store.count(&SITE_CONFIG).await, 1);

    let (_, fetched) = get(&app, "/api/config").await;
    assert_eq!(fetched["data"]["siteName"], "My Studio");
}

#[tokio::test]
async fn invalid_color_is_rejected() {
    let app = build_test_app();
    let (status, body) = put_json(
        &app,
        "/api/config",
        json!({ "siteName": "My Studio", "headerBgColor": "blue" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid color format");
    assert_eq!(app.store.count(&SITE_CONFIG).await, 0);
}
