use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn admin_can_create_another_admin_who_can_login() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;

    let res = app
        .post_with_token(
            routes::ADMIN_USERS,
            &json!({
                "username": "grace",
                "password": "alsosecure",
                "full_name": "Grace Hopper",
                "email": "grace@example.com",
            }),
            &token,
        )
        .await;
    assert_eq!(res.status, 201);
    assert!(res.body.get("password").is_none(), "password must not leak");

    let login = app
        .post_without_token(
            routes::LOGIN,
            &json!({"username": "grace", "password": "alsosecure"}),
        )
        .await;
    assert_eq!(login.status, 200);
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;

    let res = app
        .post_with_token(
            routes::ADMIN_USERS,
            &json!({
                "username": "ada",
                "password": "whatever123",
                "full_name": "Impostor",
                "email": "impostor@example.com",
            }),
            &token,
        )
        .await;

    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "USERNAME_TAKEN");
}

#[tokio::test]
async fn short_passwords_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;

    let res = app
        .post_with_token(
            routes::ADMIN_USERS,
            &json!({
                "username": "grace",
                "password": "short",
                "full_name": "Grace Hopper",
                "email": "grace@example.com",
            }),
            &token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn password_change_rehashes_and_old_password_stops_working() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;
    let grace_id = app.insert_admin("grace", "oldpassword", true).await;

    let res = app
        .patch_with_token(
            &routes::admin_user(grace_id),
            &json!({"password": "newpassword"}),
            &token,
        )
        .await;
    assert_eq!(res.status, 200);

    let old = app
        .post_without_token(
            routes::LOGIN,
            &json!({"username": "grace", "password": "oldpassword"}),
        )
        .await;
    assert_eq!(old.status, 401);

    let new = app
        .post_without_token(
            routes::LOGIN,
            &json!({"username": "grace", "password": "newpassword"}),
        )
        .await;
    assert_eq!(new.status, 200);
}

#[tokio::test]
async fn deactivated_admin_cannot_login() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;
    let grace_id = app.insert_admin("grace", "alsosecure", true).await;

    app.patch_with_token(&routes::admin_user(grace_id), &json!({"is_active": false}), &token)
        .await;

    let res = app
        .post_without_token(
            routes::LOGIN,
            &json!({"username": "grace", "password": "alsosecure"}),
        )
        .await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn admins_cannot_delete_or_deactivate_themselves() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;

    let me = app.get_with_token(routes::ME, &token).await;
    let my_id = me.body["id"].as_i64().unwrap() as i32;

    let delete = app.delete_with_token(&routes::admin_user(my_id), &token).await;
    assert_eq!(delete.status, 409);
    assert_eq!(delete.body["code"], "CONFLICT");

    let deactivate = app
        .patch_with_token(&routes::admin_user(my_id), &json!({"is_active": false}), &token)
        .await;
    assert_eq!(deactivate.status, 409);
}

#[tokio::test]
async fn other_admins_can_be_deleted() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;
    let grace_id = app.insert_admin("grace", "alsosecure", true).await;

    let res = app.delete_with_token(&routes::admin_user(grace_id), &token).await;
    assert_eq!(res.status, 204);

    let listing = app.get_with_token(routes::ADMIN_USERS, &token).await;
    let usernames: Vec<&str> = listing
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, vec!["ada"]);
}
