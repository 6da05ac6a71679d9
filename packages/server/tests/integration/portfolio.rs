use serde_json::json;

use crate::common::{TestApp, routes};

mod crud {
    use super::*;

    #[tokio::test]
    async fn create_rejects_unknown_categories() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;

        let res = app
            .post_with_token(
                routes::ADMIN_PORTFOLIO,
                &json!({
                    "title": "Some Project",
                    "summary": "A project.",
                    "description": "Details.",
                    "category": "gamedev",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected_with_conflict() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        app.create_portfolio_item(&token, "Shop Frontend", "shop").await;

        let res = app
            .post_with_token(
                routes::ADMIN_PORTFOLIO,
                &json!({
                    "title": "Shop Backend",
                    "slug": "shop",
                    "summary": "Another project.",
                    "description": "Details.",
                    "category": "web",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "SLUG_TAKEN");
    }

    #[tokio::test]
    async fn patch_can_clear_optional_links() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        let id = app.create_portfolio_item(&token, "Shop Frontend", "shop").await;

        let set = app
            .patch_with_token(
                &routes::admin_portfolio(id),
                &json!({"live_url": "https://shop.example.com"}),
                &token,
            )
            .await;
        assert_eq!(set.status, 200);
        assert_eq!(set.body["live_url"], "https://shop.example.com");

        let cleared = app
            .patch_with_token(&routes::admin_portfolio(id), &json!({"live_url": null}), &token)
            .await;
        assert_eq!(cleared.status, 200);
        assert!(cleared.body["live_url"].is_null());
    }

    #[tokio::test]
    async fn patch_rejects_non_http_urls() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        let id = app.create_portfolio_item(&token, "Shop Frontend", "shop").await;

        let res = app
            .patch_with_token(
                &routes::admin_portfolio(id),
                &json!({"live_url": "javascript:alert(1)"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod public_visibility {
    use super::*;

    #[tokio::test]
    async fn deactivating_an_item_removes_it_from_the_public_list() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        let id = app.create_portfolio_item(&token, "Shop Frontend", "shop").await;

        let before = app.get_without_token(routes::PORTFOLIO).await;
        assert_eq!(before.body.as_array().unwrap().len(), 1);

        app.patch_with_token(&routes::admin_portfolio(id), &json!({"is_active": false}), &token)
            .await;

        let after = app.get_without_token(routes::PORTFOLIO).await;
        assert_eq!(after.body.as_array().unwrap().len(), 0);

        let detail = app.get_without_token(&routes::portfolio_item("shop")).await;
        assert_eq!(detail.status, 404);
    }

    #[tokio::test]
    async fn category_filter_narrows_the_public_list() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        app.create_portfolio_item(&token, "Web Project", "web-project").await;

        let res = app
            .post_with_token(
                routes::ADMIN_PORTFOLIO,
                &json!({
                    "title": "Support Bot",
                    "slug": "support-bot",
                    "summary": "A chat bot.",
                    "description": "Details.",
                    "category": "bot",
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201);

        let bots = app
            .get_without_token(&format!("{}?category=bot", routes::PORTFOLIO))
            .await;
        let items = bots.body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["slug"], "support-bot");

        let unknown = app
            .get_without_token(&format!("{}?category=nope", routes::PORTFOLIO))
            .await;
        assert_eq!(unknown.status, 400);
    }

    #[tokio::test]
    async fn featured_filter_returns_only_featured_items() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        app.create_portfolio_item(&token, "Plain Project", "plain").await;
        let featured_id = app
            .create_portfolio_item(&token, "Featured Project", "featured")
            .await;
        app.patch_with_token(
            &routes::admin_portfolio(featured_id),
            &json!({"is_featured": true}),
            &token,
        )
        .await;

        let res = app
            .get_without_token(&format!("{}?featured=true", routes::PORTFOLIO))
            .await;
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["slug"], "featured");
    }

    #[tokio::test]
    async fn admin_list_includes_inactive_items() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        let id = app.create_portfolio_item(&token, "Shop Frontend", "shop").await;
        app.patch_with_token(&routes::admin_portfolio(id), &json!({"is_active": false}), &token)
            .await;

        let res = app.get_with_token(routes::ADMIN_PORTFOLIO, &token).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 1);
    }
}

mod reorder {
    use super::*;

    #[tokio::test]
    async fn reorder_changes_public_ordering() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        let a = app.create_portfolio_item(&token, "Project A", "project-a").await;
        let b = app.create_portfolio_item(&token, "Project B", "project-b").await;

        let res = app
            .put_with_token(
                routes::ADMIN_PORTFOLIO_REORDER,
                &json!({"ids": [b, a]}),
                &token,
            )
            .await;
        assert_eq!(res.status, 204);

        let public = app.get_without_token(routes::PORTFOLIO).await;
        let slugs: Vec<&str> = public
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["project-b", "project-a"]);
    }
}
