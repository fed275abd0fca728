//! Contact form submission and the staff inbox.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use harborview_core::MessageStatus;
use harborview_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::{Value, json};

// ============================================================================
// Submission
// ============================================================================

#[tokio::test]
async fn test_submit_stores_new_unread_message() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_json(
            "/api/contact",
            &json!({
                "name": "Marta",
                "email": "marta@example.com",
                "phone": "+385 91 555 0199",
                "subject": "Parking",
                "message": "Is there parking near the hotel?",
            }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    let id = body["id"].as_str().unwrap().to_string();

    let message: Value = ctx.admin_json(&format!("/api/contact/{id}")).await;
    assert_eq!(message["id"], id.as_str());
    assert_eq!(message["status"], "new");
    assert_eq!(message["isRead"], false);
    assert_eq!(message["adminNotes"], "");
    assert_eq!(message["email"], "marta@example.com");
    assert_eq!(message["createdAt"], message["updatedAt"]);
}

#[tokio::test]
async fn test_submissions_get_unique_ids() {
    let ctx = TestContext::new().await;

    let mut ids = HashSet::new();
    for i in 0..5 {
        ids.insert(ctx.submit_message(&format!("Guest {i}")).await);
    }
    assert_eq!(ids.len(), 5);
}

#[tokio::test]
async fn test_submit_without_contact_details_omits_them() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_json(
            "/api/contact",
            &json!({
                "name": "Ivo",
                "email": "",
                "subject": "Hello",
                "message": "Just saying hi.",
            }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let stored = ctx.data_file_json();
    let message = &stored["messages"][0];
    assert!(message.get("email").is_none());
    assert!(message.get("phone").is_none());
}

#[tokio::test]
async fn test_submit_invalid_reports_field_errors() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_json(
            "/api/contact",
            &json!({
                "name": "A",
                "email": "not-an-email",
                "message": "Hi",
            }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid data");
    let fields = &body["details"]["fieldErrors"];
    assert!(fields["name"].is_array());
    assert_eq!(fields["email"], json!(["Invalid email"]));
    assert_eq!(fields["subject"], json!(["Required"]));
    assert!(fields["message"].is_array());
    assert_eq!(body["details"]["formErrors"], json!([]));

    assert_eq!(ctx.data_file_json()["messages"], json!([]));
}

#[tokio::test]
async fn test_submit_accepts_minimum_lengths() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_json(
            "/api/contact",
            &json!({
                "name": "Al",
                "phone": "1234567",
                "subject": "Hi",
                "message": "Hello",
            }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ctx
        .post_json(
            "/api/contact",
            &json!({
                "name": "Al",
                "phone": "12345678901234567890",
                "subject": "Hi",
                "message": "Hello",
            }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_submit_wrong_types_report_field_errors() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post_json(
            "/api/contact",
            &json!({
                "name": 123,
                "subject": "Parking",
                "message": "Is there parking nearby?",
            }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid data");
    assert_eq!(
        body["details"]["fieldErrors"]["name"],
        json!(["Expected string, received number"])
    );
}

#[tokio::test]
async fn test_submit_malformed_json_is_bad_request() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/api/contact"))
        .header("content-type", "application/json")
        .body("{ name: ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

// ============================================================================
// Inbox
// ============================================================================

#[tokio::test]
async fn test_list_is_newest_first() {
    let ctx = TestContext::new().await;

    let first = ctx.submit_message("First").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = ctx.submit_message("Second").await;

    let list: Vec<Value> = ctx.admin_json("/api/contact").await;
    let ids: Vec<&str> = list.iter().map(|m| m["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
}

#[tokio::test]
async fn test_show_unknown_is_not_found() {
    let ctx = TestContext::new().await;

    let resp = ctx.admin_get("/api/contact/does-not-exist").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Message not found");
}

#[tokio::test]
async fn test_mark_read() {
    let ctx = TestContext::new().await;
    let id = ctx.submit_message("Reader").await;

    let resp = ctx.admin_patch(&format!("/api/contact/{id}/read"), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let message: Value = resp.json().await.unwrap();
    assert_eq!(message["isRead"], true);
    assert_eq!(message["status"], "new");

    let resp = ctx.admin_patch("/api/contact/missing/read", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_status_and_notes() {
    let ctx = TestContext::new().await;
    let id = ctx.submit_message("Patched").await;
    let before: Value = ctx.admin_json(&format!("/api/contact/{id}")).await;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let resp = ctx
        .admin_patch(
            &format!("/api/contact/{id}"),
            Some(&json!({ "status": "replied", "adminNotes": "Called back" })),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let after: Value = resp.json().await.unwrap();
    assert_eq!(after["status"], "replied");
    assert_eq!(after["adminNotes"], "Called back");
    assert_eq!(after["createdAt"], before["createdAt"]);
    assert_ne!(after["updatedAt"], before["updatedAt"]);
}

#[tokio::test]
async fn test_every_status_is_settable() {
    let ctx = TestContext::new().await;
    let id = ctx.submit_message("Cycler").await;

    for status in MessageStatus::ALL {
        let resp = ctx
            .admin_patch(
                &format!("/api/contact/{id}"),
                Some(&json!({ "status": status.as_str() })),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let message: Value = resp.json().await.unwrap();
        assert_eq!(message["status"], status.as_str());
    }
}

#[tokio::test]
async fn test_update_rejects_unknown_status() {
    let ctx = TestContext::new().await;
    let id = ctx.submit_message("Strict").await;

    let resp = ctx
        .admin_patch(&format!("/api/contact/{id}"), Some(&json!({ "status": "spam" })))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["details"]["fieldErrors"]["status"].is_array());

    let message: Value = ctx.admin_json(&format!("/api/contact/{id}")).await;
    assert_eq!(message["status"], "new");
}

#[tokio::test]
async fn test_update_wrong_types_report_field_errors() {
    let ctx = TestContext::new().await;
    let id = ctx.submit_message("Typed").await;

    let resp = ctx
        .admin_patch(
            &format!("/api/contact/{id}"),
            Some(&json!({ "adminNotes": 5, "isRead": "yes" })),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid data");
    let fields = &body["details"]["fieldErrors"];
    assert_eq!(fields["adminNotes"], json!(["Expected string, received number"]));
    assert_eq!(fields["isRead"], json!(["Expected boolean, received string"]));

    let message: Value = ctx.admin_json(&format!("/api/contact/{id}")).await;
    assert_eq!(message["adminNotes"], "");
    assert_eq!(message["isRead"], false);
}

#[tokio::test]
async fn test_delete() {
    let ctx = TestContext::new().await;
    let keep = ctx.submit_message("Keep").await;
    let remove = ctx.submit_message("Remove").await;

    let resp = ctx.admin_delete(&format!("/api/contact/{remove}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);

    let list: Vec<Value> = ctx.admin_json("/api/contact").await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], keep.as_str());
}

#[tokio::test]
async fn test_delete_unknown_leaves_inbox_unchanged() {
    let ctx = TestContext::new().await;
    ctx.submit_message("Stays").await;

    let resp = ctx.admin_delete("/api/contact/nope").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let list: Vec<Value> = ctx.admin_json("/api/contact").await;
    assert_eq!(list.len(), 1);
}

// ============================================================================
// Stats
// ============================================================================

#[tokio::test]
async fn test_stats_track_inbox() {
    let ctx = TestContext::new().await;
    let a = ctx.submit_message("A guest").await;
    let b = ctx.submit_message("B guest").await;
    ctx.submit_message("C guest").await;

    ctx.admin_patch(&format!("/api/contact/{a}/read"), None).await;
    ctx.admin_patch(
        &format!("/api/contact/{b}"),
        Some(&json!({ "status": "replied", "isRead": true })),
    )
    .await;

    let stats: Value = ctx.get_json("/api/contact/stats").await;
    assert_eq!(stats, json!({ "total": 3, "unread": 1, "replied": 1 }));

    ctx.admin_delete(&format!("/api/contact/{b}")).await;
    let stats: Value = ctx.get_json("/api/contact/stats").await;
    assert_eq!(stats, json!({ "total": 2, "unread": 1, "replied": 0 }));
}

#[tokio::test]
async fn test_concurrent_submissions_are_all_kept() {
    let ctx = TestContext::new().await;

    let mut handles = Vec::new();
    for i in 0..20 {
        let client = ctx.client.clone();
        let url = ctx.url("/api/contact");
        handles.push(tokio::spawn(async move {
            client
                .post(url)
                .json(&json!({
                    "name": format!("Guest {i}"),
                    "subject": "Booking",
                    "message": "Do you have rooms free?",
                }))
                .send()
                .await
                .unwrap()
                .status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    let stats: Value = ctx.get_json("/api/contact/stats").await;
    assert_eq!(stats["total"], 20);
    assert_eq!(ctx.data_file_json()["messages"].as_array().unwrap().len(), 20);
}
