use serde_json::json;

use crate::common::{TestApp, routes};

mod crud {
    use super::*;

    #[tokio::test]
    async fn create_returns_full_resource_with_derived_fields() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;

        let res = app
            .post_with_token(
                routes::ADMIN_TEAM,
                &json!({
                    "name": "Grace Hopper",
                    "role_title": "Principal Engineer",
                    "expertise": ["Compilers", "Databases"],
                    "bio": "Invented things.",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["slug"], "grace-hopper");
        assert_eq!(res.body["is_active"], true);
        assert_eq!(res.body["expertise"], json!(["Compilers", "Databases"]));
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected_with_conflict() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        app.create_team_member(&token, "Grace Hopper", "grace").await;

        let res = app
            .post_with_token(
                routes::ADMIN_TEAM,
                &json!({
                    "name": "Another Grace",
                    "slug": "grace",
                    "role_title": "Engineer",
                    "bio": "Different person.",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "SLUG_TAKEN");
    }

    #[tokio::test]
    async fn patch_updates_only_provided_fields() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        let id = app.create_team_member(&token, "Grace Hopper", "grace").await;

        let res = app
            .patch_with_token(
                &routes::admin_team(id),
                &json!({"role_title": "CTO"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["role_title"], "CTO");
        assert_eq!(res.body["name"], "Grace Hopper");
    }

    #[tokio::test]
    async fn patch_can_null_out_nullable_fields() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        let id = app.create_team_member(&token, "Grace Hopper", "grace").await;

        let set = app
            .patch_with_token(
                &routes::admin_team(id),
                &json!({"seo_title": "Meet Grace"}),
                &token,
            )
            .await;
        assert_eq!(set.status, 200);
        assert_eq!(set.body["seo_title"], "Meet Grace");

        let cleared = app
            .patch_with_token(&routes::admin_team(id), &json!({"seo_title": null}), &token)
            .await;
        assert_eq!(cleared.status, 200);
        assert!(cleared.body["seo_title"].is_null());
    }

    #[tokio::test]
    async fn empty_patch_returns_resource_unchanged() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        let id = app.create_team_member(&token, "Grace Hopper", "grace").await;

        let res = app
            .patch_with_token(&routes::admin_team(id), &json!({}), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Grace Hopper");
    }

    #[tokio::test]
    async fn delete_removes_the_member() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        let id = app.create_team_member(&token, "Grace Hopper", "grace").await;

        let res = app.delete_with_token(&routes::admin_team(id), &token).await;
        assert_eq!(res.status, 204);

        let gone = app.get_with_token(&routes::admin_team(id), &token).await;
        assert_eq!(gone.status, 404);
    }

    #[tokio::test]
    async fn admin_routes_require_authentication() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ADMIN_TEAM).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }
}

mod public_visibility {
    use super::*;

    #[tokio::test]
    async fn public_list_contains_only_active_members() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        app.create_team_member(&token, "Visible Member", "visible").await;
        let hidden_id = app.create_team_member(&token, "Hidden Member", "hidden").await;

        let res = app
            .patch_with_token(
                &routes::admin_team(hidden_id),
                &json!({"is_active": false}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200);

        let public = app.get_without_token(routes::TEAM).await;
        assert_eq!(public.status, 200);
        let names: Vec<&str> = public
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"Visible Member"));
        assert!(!names.contains(&"Hidden Member"));
    }

    #[tokio::test]
    async fn reactivating_a_member_restores_public_visibility() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        let id = app.create_team_member(&token, "Grace Hopper", "grace").await;

        app.patch_with_token(&routes::admin_team(id), &json!({"is_active": false}), &token)
            .await;
        let hidden = app.get_without_token(&routes::team_member("grace")).await;
        assert_eq!(hidden.status, 404);

        app.patch_with_token(&routes::admin_team(id), &json!({"is_active": true}), &token)
            .await;
        let visible = app.get_without_token(&routes::team_member("grace")).await;
        assert_eq!(visible.status, 200);
        assert_eq!(visible.body["name"], "Grace Hopper");
    }

    #[tokio::test]
    async fn inactive_member_detail_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        let id = app.create_team_member(&token, "Grace Hopper", "grace").await;
        app.patch_with_token(&routes::admin_team(id), &json!({"is_active": false}), &token)
            .await;

        let res = app.get_without_token(&routes::team_member("grace")).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod reorder {
    use super::*;

    #[tokio::test]
    async fn reorder_assigns_display_order_by_array_index() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        let a = app.create_team_member(&token, "Member A", "member-a").await;
        let b = app.create_team_member(&token, "Member B", "member-b").await;
        let c = app.create_team_member(&token, "Member C", "member-c").await;

        let res = app
            .put_with_token(
                routes::ADMIN_TEAM_REORDER,
                &json!({"ids": [c, a, b]}),
                &token,
            )
            .await;
        assert_eq!(res.status, 204);

        let public = app.get_without_token(routes::TEAM).await;
        let slugs: Vec<&str> = public
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["member-c", "member-a", "member-b"]);
    }

    #[tokio::test]
    async fn reorder_rejects_incomplete_id_sets() {
        let app = TestApp::spawn().await;
        let token = app.create_admin("ada", "securepass").await;
        let a = app.create_team_member(&token, "Member A", "member-a").await;
        let _b = app.create_team_member(&token, "Member B", "member-b").await;

        let res = app
            .put_with_token(routes::ADMIN_TEAM_REORDER, &json!({"ids": [a]}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}
