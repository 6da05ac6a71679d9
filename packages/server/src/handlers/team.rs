use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::team_member;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::shared::{ReorderRequest, escape_like, resolve_slug, tags_to_json, validate_reorder_ids};
use crate::models::team::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Team",
    operation_id = "listTeam",
    summary = "List active team members",
    description = "Returns active team members ordered by display_order, then name. Public endpoint.",
    responses(
        (status = 200, description = "List of team members", body = Vec<TeamMemberResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_team(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamMemberResponse>>, AppError> {
    let rows = team_member::Entity::find()
        .filter(team_member::Column::IsActive.eq(true))
        .order_by_asc(team_member::Column::DisplayOrder)
        .order_by_asc(team_member::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(TeamMemberResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "Team",
    operation_id = "getTeamMember",
    summary = "Get an active team member by slug",
    params(("slug" = String, Path, description = "Team member slug")),
    responses(
        (status = 200, description = "Team member details", body = TeamMemberResponse),
        (status = 404, description = "Not found or inactive (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(slug))]
pub async fn get_team_member(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<TeamMemberResponse>, AppError> {
    let member = team_member::Entity::find()
        .filter(team_member::Column::Slug.eq(&slug))
        .filter(team_member::Column::IsActive.eq(true))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Team member not found".into()))?;

    Ok(Json(member.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Team",
    operation_id = "adminListTeam",
    summary = "List all team members including inactive ones",
    params(TeamListQuery),
    responses(
        (status = 200, description = "List of team members", body = Vec<TeamMemberResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, query))]
pub async fn admin_list_team(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Query(query): Query<TeamListQuery>,
) -> Result<Json<Vec<TeamMemberResponse>>, AppError> {
    let mut select = team_member::Entity::find();

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(team_member::Column::Name)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    let rows = select
        .order_by_asc(team_member::Column::DisplayOrder)
        .order_by_asc(team_member::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(TeamMemberResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Team",
    operation_id = "createTeamMember",
    summary = "Create a team member",
    request_body = CreateTeamMemberRequest,
    responses(
        (status = 201, description = "Team member created", body = TeamMemberResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Slug already in use (SLUG_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, payload), fields(name = %payload.name))]
pub async fn create_team_member(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTeamMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_team_member(&payload)?;
    let slug = resolve_slug(payload.slug.as_deref(), &payload.name)?;

    let now = chrono::Utc::now();
    let new_member = team_member::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        slug: Set(slug),
        role_title: Set(payload.role_title.trim().to_string()),
        expertise: Set(tags_to_json(&payload.expertise)),
        image_ref: Set(payload.image_ref),
        bio: Set(payload.bio),
        display_order: Set(payload.display_order),
        is_active: Set(payload.is_active),
        seo_title: Set(payload.seo_title),
        seo_description: Set(payload.seo_description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_member.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::SlugTaken,
        _ => AppError::from(e),
    })?;

    Ok((StatusCode::CREATED, Json(TeamMemberResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Team",
    operation_id = "adminGetTeamMember",
    summary = "Get a team member by ID",
    params(("id" = i32, Path, description = "Team member ID")),
    responses(
        (status = 200, description = "Team member details", body = TeamMemberResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth), fields(id))]
pub async fn admin_get_team_member(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TeamMemberResponse>, AppError> {
    let model = find_team_member(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Team",
    operation_id = "updateTeamMember",
    summary = "Update a team member",
    description = "Partially updates a team member using PATCH semantics — only provided fields are modified. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Team member ID")),
    request_body = UpdateTeamMemberRequest,
    responses(
        (status = 200, description = "Team member updated", body = TeamMemberResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Slug already in use (SLUG_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, payload), fields(id))]
pub async fn update_team_member(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateTeamMemberRequest>,
) -> Result<Json<TeamMemberResponse>, AppError> {
    validate_update_team_member(&payload)?;

    if payload == UpdateTeamMemberRequest::default() {
        let existing = find_team_member(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;

    let existing = find_team_member(&txn, id).await?;
    let mut active: team_member::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(ref slug) = payload.slug {
        let slug = crate::utils::slug::validate_slug(slug)
            .map_err(|e| AppError::Validation(e.message().into()))?;
        active.slug = Set(slug.to_string());
    }
    if let Some(ref role_title) = payload.role_title {
        active.role_title = Set(role_title.trim().to_string());
    }
    if let Some(ref expertise) = payload.expertise {
        active.expertise = Set(tags_to_json(expertise));
    }
    if let Some(image_ref) = payload.image_ref {
        active.image_ref = Set(image_ref);
    }
    if let Some(bio) = payload.bio {
        active.bio = Set(bio);
    }
    if let Some(display_order) = payload.display_order {
        active.display_order = Set(display_order);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(seo_title) = payload.seo_title {
        active.seo_title = Set(seo_title);
    }
    if let Some(seo_description) = payload.seo_description {
        active.seo_description = Set(seo_description);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::SlugTaken,
        _ => AppError::from(e),
    })?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Team",
    operation_id = "deleteTeamMember",
    summary = "Delete a team member",
    params(("id" = i32, Path, description = "Team member ID")),
    responses(
        (status = 204, description = "Team member deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth), fields(id))]
pub async fn delete_team_member(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    find_team_member(&state.db, id).await?;
    team_member::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/reorder",
    tag = "Team",
    operation_id = "reorderTeam",
    summary = "Reorder team members",
    description = "Replaces the display order of all team members. The ID array must contain exactly the current members; display_order is assigned by array index starting at 0.",
    request_body = ReorderRequest,
    responses(
        (status = 204, description = "Team reordered"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, payload))]
pub async fn reorder_team(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ReorderRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_reorder_ids(&payload.ids, "team member id")?;

    let txn = state.db.begin().await?;

    let existing: Vec<i32> = team_member::Entity::find()
        .select_only()
        .column(team_member::Column::Id)
        .into_tuple::<i32>()
        .all(&txn)
        .await?;

    let existing_set: std::collections::HashSet<i32> = existing.into_iter().collect();
    let payload_set: std::collections::HashSet<i32> = payload.ids.iter().copied().collect();
    if existing_set != payload_set {
        return Err(AppError::Validation(
            "ids must contain exactly the current team members".into(),
        ));
    }

    for (i, &member_id) in payload.ids.iter().enumerate() {
        team_member::Entity::update_many()
            .filter(team_member::Column::Id.eq(member_id))
            .col_expr(
                team_member::Column::DisplayOrder,
                Expr::value(
                    i32::try_from(i)
                        .map_err(|_| AppError::Validation("Too many members to reorder".into()))?,
                ),
            )
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_team_member<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<team_member::Model, AppError> {
    team_member::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Team member not found".into()))
}
