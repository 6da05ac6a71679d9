use serde_json::json;

use crate::common::{TestApp, routes};

mod form {
    use super::*;

    #[tokio::test]
    async fn valid_submission_is_stored_with_status_new() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;

        let res = app
            .post_without_token(
                routes::CONTACT,
                &json!({
                    "name": "A Customer",
                    "email": "customer@example.com",
                    "phone": "+1 555 0100",
                    "subject": "Quote request",
                    "body": "We would like a quote for a web shop.",
                }),
            )
            .await;

        assert_eq!(res.status, 201);
        let id = res.id();

        let stored = app.get_with_token(&routes::admin_message(id), &token).await;
        assert_eq!(stored.status, 200);
        assert_eq!(stored.body["subject"], "Quote request");
    }

    #[tokio::test]
    async fn submission_with_invalid_email_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::CONTACT,
                &json!({
                    "name": "A Customer",
                    "email": "not-an-email",
                    "subject": "Hello",
                    "body": "Hi.",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn submission_with_missing_fields_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::CONTACT, &json!({"name": "A Customer"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod contact_info {
    use super::*;

    #[tokio::test]
    async fn singleton_is_seeded_and_publicly_readable() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::CONTACT_INFO).await;

        assert_eq!(res.status, 200);
        assert!(res.body["email"].is_string());
        assert!(res.body["social_links"].is_object());
    }

    #[tokio::test]
    async fn admin_update_replaces_the_singleton_for_public_readers() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;

        let res = app
            .put_with_token(
                routes::ADMIN_CONTACT_INFO,
                &json!({
                    "phone": "+49 30 123456",
                    "email": "office@example.com",
                    "address": "Unter den Linden 1, Berlin",
                    "working_hours": "Mon-Fri 8:00-16:00",
                    "social_links": {"github": "https://github.com/example"},
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 200);

        let public = app.get_without_token(routes::CONTACT_INFO).await;
        assert_eq!(public.body["email"], "office@example.com");
        assert_eq!(
            public.body["social_links"]["github"],
            "https://github.com/example"
        );
    }

    #[tokio::test]
    async fn update_rejects_non_url_social_links() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;

        let res = app
            .put_with_token(
                routes::ADMIN_CONTACT_INFO,
                &json!({
                    "phone": "+49 30 123456",
                    "email": "office@example.com",
                    "address": "Somewhere 1",
                    "working_hours": "Always",
                    "social_links": {"github": "not a url"},
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn update_requires_authentication() {
        let app = TestApp::spawn().await;

        let res = app
            .client
            .put(format!("http://{}{}", app.addr, routes::ADMIN_CONTACT_INFO))
            .json(&json!({}))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(res.status().as_u16(), 401);
    }
}
