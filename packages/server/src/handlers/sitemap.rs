use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::Response;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{blog_post, portfolio_item, team_member};
use crate::error::AppError;
use crate::state::AppState;

/// Fixed pages of the public site, relative to the site root.
const STATIC_PATHS: &[&str] = &[
    "",
    "/about",
    "/services",
    "/portfolio",
    "/blog",
    "/contact",
    "/privacy-policy",
    "/terms-of-service",
];

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Serve `sitemap.xml` for the public site: the fixed pages plus every
/// active team member, active portfolio item, and published blog post.
#[instrument(skip(state))]
pub async fn sitemap(State(state): State<AppState>) -> Result<Response, AppError> {
    let base = state.config.server.public_url.trim_end_matches('/').to_string();

    let mut urls: Vec<String> = STATIC_PATHS.iter().map(|p| format!("{base}{p}")).collect();

    let team_slugs: Vec<String> = team_member::Entity::find()
        .filter(team_member::Column::IsActive.eq(true))
        .select_only()
        .column(team_member::Column::Slug)
        .into_tuple::<String>()
        .all(&state.db)
        .await?;
    urls.extend(team_slugs.into_iter().map(|s| format!("{base}/team/{s}")));

    let portfolio_slugs: Vec<String> = portfolio_item::Entity::find()
        .filter(portfolio_item::Column::IsActive.eq(true))
        .select_only()
        .column(portfolio_item::Column::Slug)
        .into_tuple::<String>()
        .all(&state.db)
        .await?;
    urls.extend(
        portfolio_slugs
            .into_iter()
            .map(|s| format!("{base}/portfolio/{s}")),
    );

    let blog_slugs: Vec<String> = blog_post::Entity::find()
        .filter(blog_post::Column::IsPublished.eq(true))
        .select_only()
        .column(blog_post::Column::Slug)
        .into_tuple::<String>()
        .all(&state.db)
        .await?;
    urls.extend(blog_slugs.into_iter().map(|s| format!("{base}/blog/{s}")));

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for url in &urls {
        xml.push_str(&format!("  <url><loc>{}</loc></url>\n", escape_xml(url)));
    }
    xml.push_str("</urlset>\n");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/xml; charset=utf-8")
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from(xml))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
