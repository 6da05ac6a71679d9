use axum::Json;
use axum::extract::State;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{blog_post, contact_message, media_ref, portfolio_item, team_member};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::models::dashboard::DashboardResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Admin Users",
    operation_id = "getDashboard",
    summary = "Entity counts for the admin dashboard",
    responses(
        (status = 200, description = "Dashboard counts", body = DashboardResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth))]
pub async fn get_dashboard(
    _auth: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let db = &state.db;

    let team_members = team_member::Entity::find().count(db).await?;
    let active_team_members = team_member::Entity::find()
        .filter(team_member::Column::IsActive.eq(true))
        .count(db)
        .await?;
    let portfolio_items = portfolio_item::Entity::find().count(db).await?;
    let active_portfolio_items = portfolio_item::Entity::find()
        .filter(portfolio_item::Column::IsActive.eq(true))
        .count(db)
        .await?;
    let blog_posts = blog_post::Entity::find().count(db).await?;
    let published_blog_posts = blog_post::Entity::find()
        .filter(blog_post::Column::IsPublished.eq(true))
        .count(db)
        .await?;
    let messages = contact_message::Entity::find().count(db).await?;
    let new_messages = contact_message::Entity::find()
        .filter(contact_message::Column::Status.eq("new"))
        .count(db)
        .await?;
    let media_files = media_ref::Entity::find().count(db).await?;

    Ok(Json(DashboardResponse {
        team_members,
        active_team_members,
        portfolio_items,
        active_portfolio_items,
        blog_posts,
        published_blog_posts,
        messages,
        new_messages,
        media_files,
    }))
}
