use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn inbox_lists_messages_newest_first_with_status_filter() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;
    let first = app.submit_contact_message("First enquiry").await;
    let second = app.submit_contact_message("Second enquiry").await;

    let all = app.get_with_token(routes::ADMIN_MESSAGES, &token).await;
    assert_eq!(all.status, 200);
    let data = all.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);

    // Mark one read, then filter by status.
    let opened = app.get_with_token(&routes::admin_message(first), &token).await;
    assert_eq!(opened.body["status"], "read");

    let new_only = app
        .get_with_token(&format!("{}?status=new", routes::ADMIN_MESSAGES), &token)
        .await;
    let data = new_only.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], second);
}

#[tokio::test]
async fn opening_a_new_message_marks_it_read() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;
    let id = app.submit_contact_message("Enquiry").await;

    let first_open = app.get_with_token(&routes::admin_message(id), &token).await;
    assert_eq!(first_open.body["status"], "read");

    // A second open leaves the status alone.
    let second_open = app.get_with_token(&routes::admin_message(id), &token).await;
    assert_eq!(second_open.body["status"], "read");
}

#[tokio::test]
async fn status_transitions_and_notes_can_be_patched() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;
    let id = app.submit_contact_message("Enquiry").await;

    let res = app
        .patch_with_token(
            &routes::admin_message(id),
            &json!({"status": "replied", "admin_notes": "Sent quote on Tuesday."}),
            &token,
        )
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], "replied");
    assert_eq!(res.body["admin_notes"], "Sent quote on Tuesday.");

    let cleared = app
        .patch_with_token(&routes::admin_message(id), &json!({"admin_notes": null}), &token)
        .await;
    assert!(cleared.body["admin_notes"].is_null());
    assert_eq!(cleared.body["status"], "replied");
}

#[tokio::test]
async fn unknown_status_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;
    let id = app.submit_contact_message("Enquiry").await;

    let res = app
        .patch_with_token(&routes::admin_message(id), &json!({"status": "spam"}), &token)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn messages_can_be_deleted() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;
    let id = app.submit_contact_message("Enquiry").await;

    let res = app.delete_with_token(&routes::admin_message(id), &token).await;
    assert_eq!(res.status, 204);

    let gone = app.get_with_token(&routes::admin_message(id), &token).await;
    assert_eq!(gone.status, 404);
}

#[tokio::test]
async fn inbox_requires_authentication() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::ADMIN_MESSAGES).await;
    assert_eq!(res.status, 401);
}

#[tokio::test]
async fn dashboard_counts_unread_messages() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;
    let first = app.submit_contact_message("First").await;
    app.submit_contact_message("Second").await;

    // Open one so it stops counting as new.
    app.get_with_token(&routes::admin_message(first), &token).await;

    let res = app.get_with_token(routes::ADMIN_DASHBOARD, &token).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["messages"], 2);
    assert_eq!(res.body["new_messages"], 1);
}
