use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn sitemap_lists_static_pages_and_active_content() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;
    app.create_team_member(&token, "Grace Hopper", "grace").await;
    app.create_portfolio_item(&token, "Shop Frontend", "shop").await;
    app.create_blog_post(&token, "Launch Post", "launch-post", true).await;
    app.create_blog_post(&token, "Draft Post", "draft-post", false).await;

    let res = app
        .client
        .get(format!("http://{}/sitemap.xml", app.addr))
        .send()
        .await
        .expect("Failed to fetch sitemap");

    assert_eq!(res.status().as_u16(), 200);
    assert!(
        res.headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("application/xml")
    );

    let body = res.text().await.unwrap();
    assert!(body.contains("<loc>https://example.com/contact</loc>"));
    assert!(body.contains("<loc>https://example.com/team/grace</loc>"));
    assert!(body.contains("<loc>https://example.com/portfolio/shop</loc>"));
    assert!(body.contains("<loc>https://example.com/blog/launch-post</loc>"));
    assert!(!body.contains("draft-post"));
}

#[tokio::test]
async fn deactivated_content_drops_out_of_the_sitemap() {
    let app = TestApp::spawn().await;
    let token = app.create_admin("ada", "securepass").await;
    let id = app.create_team_member(&token, "Grace Hopper", "grace").await;

    app.patch_with_token(
        &format!("{}/{id}", routes::ADMIN_TEAM),
        &json!({"is_active": false}),
        &token,
    )
    .await;

    let res = app
        .client
        .get(format!("http://{}/sitemap.xml", app.addr))
        .send()
        .await
        .unwrap();
    let body = res.text().await.unwrap();
    assert!(!body.contains("/team/grace"));
}
