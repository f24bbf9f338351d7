//! Integration tests for pages, including lookup by slug.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, delete, get, post_json};
use serde_json::json;

fn page(slug: &str, published: bool) -> serde_json::Value {
    json!({
        "slug": slug,
        "title": "About Us",
        "content": "Welcome to the studio.",
        "metaTitle": "About",
        "published": published
    })
}

#[tokio::test]
async fn create_and_fetch_by_id_and_slug() {
    let app = build_test_app();
    let (status, created) = post_json(&app, "/api/pages", page("about", true)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Page created successfully");
    assert_eq!(created["data"]["metaTitle"], "About");
    let id = created["data"]["id"].as_str().unwrap();

    let (status, by_id) = get(&app, &format!("/api/pages/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id["data"]["slug"], "about");

    let (status, by_slug) = get(&app, "/api/pages/slug/about").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_slug["data"]["id"], id);

    let (status, missing) = get(&app, "/api/pages/slug/contact").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["error"], "Page not found");
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let app = build_test_app();
    post_json(&app, "/api/pages", page("about", true)).await;
    let (status, body) = post_json(&app, "/api/pages", page("about", false)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Page with this slug already exists");
}

#[tokio::test]
async fn published_filter_and_newest_first() {
    let app = build_test_app();
    post_json(&app, "/api/pages", page("first", true)).await;
    post_json(&app, "/api/pages", page("draft", false)).await;
    post_json(&app, "/api/pages", page("latest", true)).await;

    let (_, all) = get(&app, "/api/pages").await;
    let slugs: Vec<_> = all["data"].as_array().unwrap().iter().map(|p| p["slug"].clone()).collect();
    assert_eq!(slugs, vec![json!("latest"), json!("draft"), json!("first")]);

    let (_, published) = get(&app, "/api/pages?published=true").await;
    let slugs: Vec<_> = published["data"].as_array().unwrap().iter().map(|p| p["slug"].clone()).collect();
    assert_eq!(slugs, vec![json!("latest"), json!("first")]);
}

#[tokio::test]
async fn missing_content_fails_validation() {
    let app = build_test_app();
    let (status, body) = post_json(&app, "/api/pages", json!({ "slug": "about", "title": "About" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "content");
}

#[tokio::test]
async fn delete_returns_the_id() {
    let app = build_test_app();
    let (_, created) = post_json(&app, "/api/pages", page("about", true)).await;
    let id = created["data"]["id"].as_str().unwrap();
    let (status, body) = delete(&app, &format!("/api/pages/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "message": "Page deleted successfully", "data": { "id": id } }));
    let (status, _) = delete(&app, &format!("/api/pages/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn draft_is_hidden_from_slug_lookup() {
    let app = build_test_app();
    let (_, created) = post_json(&app, "/api/pages", page("draft", false)).await;
    let id = created["data"]["id"].as_str().unwrap();

    let (status, body) = get(&app, "/api/pages/slug/draft").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Page not found");
    assert!(body.get("data").is_none());

    let (status, _) = get(&app, &format!("/api/pages/{id}")).await;
    assert_eq!(status, StatusCode::OK);
}
