//! `x-admin-key` enforcement on staff routes.

#![allow(clippy::unwrap_used)]

use harborview_integration_tests::{TEST_ADMIN_KEY, TestContext};
use reqwest::StatusCode;
use serde_json::{Value, json};

const ADMIN_ROUTES: &[(&str, &str)] = &[
    ("GET", "/api/contact"),
    ("GET", "/api/contact/some-id"),
    ("PATCH", "/api/contact/some-id/read"),
    ("PATCH", "/api/contact/some-id"),
    ("DELETE", "/api/contact/some-id"),
    ("GET", "/api/testimonials/admin"),
    ("DELETE", "/api/testimonials/some-id"),
];

async fn send(
    ctx: &TestContext,
    method: &str,
    path: &str,
    key: Option<&str>,
) -> StatusCode {
    let method = reqwest::Method::from_bytes(method.as_bytes()).unwrap();
    let mut request = ctx
        .client
        .request(method, ctx.url(path))
        .json(&json!({}));
    if let Some(key) = key {
        request = request.header("x-admin-key", key);
    }
    request.send().await.unwrap().status()
}

#[tokio::test]
async fn test_admin_routes_require_key() {
    let ctx = TestContext::with_admin_key().await;

    for (method, path) in ADMIN_ROUTES {
        assert_eq!(
            send(&ctx, method, path, None).await,
            StatusCode::UNAUTHORIZED,
            "{method} {path} without key"
        );
        assert_eq!(
            send(&ctx, method, path, Some("wrong-key")).await,
            StatusCode::UNAUTHORIZED,
            "{method} {path} with wrong key"
        );
    }
}

#[tokio::test]
async fn test_unauthorized_body() {
    let ctx = TestContext::with_admin_key().await;

    let resp = ctx.client.get(ctx.url("/api/contact")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_correct_key_is_accepted() {
    let ctx = TestContext::with_admin_key().await;
    let id = ctx.submit_message("Keyed").await;

    assert_eq!(
        send(&ctx, "GET", "/api/contact", Some(TEST_ADMIN_KEY)).await,
        StatusCode::OK
    );
    assert_eq!(
        send(&ctx, "PATCH", &format!("/api/contact/{id}/read"), Some(TEST_ADMIN_KEY)).await,
        StatusCode::OK
    );
    assert_eq!(ctx.admin_get("/api/testimonials/admin").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_public_routes_do_not_need_key() {
    let ctx = TestContext::with_admin_key().await;

    ctx.submit_message("Public").await;
    ctx.submit_testimonial("Public", 5).await;
    assert_eq!(ctx.get("/api/contact/stats").await.status(), StatusCode::OK);
    assert_eq!(ctx.get("/api/testimonials").await.status(), StatusCode::OK);
    assert_eq!(ctx.get("/api/testimonials/stats").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_guard_disabled_without_configured_key() {
    let ctx = TestContext::new().await;

    assert_eq!(send(&ctx, "GET", "/api/contact", None).await, StatusCode::OK);
    assert_eq!(
        send(&ctx, "GET", "/api/testimonials/admin", None).await,
        StatusCode::OK
    );
}
