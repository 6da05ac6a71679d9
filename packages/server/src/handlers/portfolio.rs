use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::portfolio_item;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::portfolio::*;
use crate::models::shared::{
    ReorderRequest, escape_like, resolve_slug, tags_to_json, validate_reorder_ids,
};
use crate::state::AppState;
use crate::utils::slug::validate_slug;

#[utoipa::path(
    get,
    path = "/",
    tag = "Portfolio",
    operation_id = "listPortfolio",
    summary = "List active portfolio items",
    description = "Returns active items ordered by display_order. Supports category and featured-only filters. Public endpoint.",
    params(PortfolioListQuery),
    responses(
        (status = 200, description = "List of portfolio items", body = Vec<PortfolioItemResponse>),
        (status = 400, description = "Unknown category (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_portfolio(
    State(state): State<AppState>,
    Query(query): Query<PortfolioListQuery>,
) -> Result<Json<Vec<PortfolioItemResponse>>, AppError> {
    let mut select = portfolio_item::Entity::find()
        .filter(portfolio_item::Column::IsActive.eq(true));

    select = apply_filters(select, &query)?;

    let rows = select
        .order_by_asc(portfolio_item::Column::DisplayOrder)
        .order_by_desc(portfolio_item::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(PortfolioItemResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "Portfolio",
    operation_id = "getPortfolioItem",
    summary = "Get an active portfolio item by slug",
    params(("slug" = String, Path, description = "Portfolio item slug")),
    responses(
        (status = 200, description = "Portfolio item details", body = PortfolioItemResponse),
        (status = 404, description = "Not found or inactive (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(slug))]
pub async fn get_portfolio_item(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PortfolioItemResponse>, AppError> {
    let item = portfolio_item::Entity::find()
        .filter(portfolio_item::Column::Slug.eq(&slug))
        .filter(portfolio_item::Column::IsActive.eq(true))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio item not found".into()))?;

    Ok(Json(item.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Portfolio",
    operation_id = "adminListPortfolio",
    summary = "List all portfolio items including inactive ones",
    params(PortfolioListQuery),
    responses(
        (status = 200, description = "List of portfolio items", body = Vec<PortfolioItemResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, query))]
pub async fn admin_list_portfolio(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Query(query): Query<PortfolioListQuery>,
) -> Result<Json<Vec<PortfolioItemResponse>>, AppError> {
    let mut select = portfolio_item::Entity::find();

    select = apply_filters(select, &query)?;

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(portfolio_item::Column::Title)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    let rows = select
        .order_by_asc(portfolio_item::Column::DisplayOrder)
        .order_by_desc(portfolio_item::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(PortfolioItemResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Portfolio",
    operation_id = "createPortfolioItem",
    summary = "Create a portfolio item",
    request_body = CreatePortfolioItemRequest,
    responses(
        (status = 201, description = "Portfolio item created", body = PortfolioItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Slug already in use (SLUG_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, payload), fields(title = %payload.title))]
pub async fn create_portfolio_item(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePortfolioItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_portfolio_item(&payload)?;
    let slug = resolve_slug(payload.slug.as_deref(), &payload.title)?;

    let now = chrono::Utc::now();
    let new_item = portfolio_item::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        slug: Set(slug),
        summary: Set(payload.summary.trim().to_string()),
        description: Set(payload.description),
        category: Set(payload.category),
        technologies: Set(tags_to_json(&payload.technologies)),
        live_url: Set(payload.live_url),
        source_url: Set(payload.source_url),
        client_name: Set(payload.client_name),
        completed_on: Set(payload.completed_on),
        is_featured: Set(payload.is_featured),
        is_active: Set(payload.is_active),
        display_order: Set(payload.display_order),
        seo_title: Set(payload.seo_title),
        seo_description: Set(payload.seo_description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_item.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::SlugTaken,
        _ => AppError::from(e),
    })?;

    Ok((StatusCode::CREATED, Json(PortfolioItemResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Portfolio",
    operation_id = "adminGetPortfolioItem",
    summary = "Get a portfolio item by ID",
    params(("id" = i32, Path, description = "Portfolio item ID")),
    responses(
        (status = 200, description = "Portfolio item details", body = PortfolioItemResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth), fields(id))]
pub async fn admin_get_portfolio_item(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PortfolioItemResponse>, AppError> {
    let model = find_portfolio_item(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Portfolio",
    operation_id = "updatePortfolioItem",
    summary = "Update a portfolio item",
    description = "Partially updates a portfolio item using PATCH semantics. Nullable fields (links, client, completion date, SEO) support absent / null / value updates.",
    params(("id" = i32, Path, description = "Portfolio item ID")),
    request_body = UpdatePortfolioItemRequest,
    responses(
        (status = 200, description = "Portfolio item updated", body = PortfolioItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Slug already in use (SLUG_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, payload), fields(id))]
pub async fn update_portfolio_item(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdatePortfolioItemRequest>,
) -> Result<Json<PortfolioItemResponse>, AppError> {
    validate_update_portfolio_item(&payload)?;

    if payload == UpdatePortfolioItemRequest::default() {
        let existing = find_portfolio_item(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;

    let existing = find_portfolio_item(&txn, id).await?;
    let mut active: portfolio_item::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(ref slug) = payload.slug {
        let slug = validate_slug(slug).map_err(|e| AppError::Validation(e.message().into()))?;
        active.slug = Set(slug.to_string());
    }
    if let Some(ref summary) = payload.summary {
        active.summary = Set(summary.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(ref technologies) = payload.technologies {
        active.technologies = Set(tags_to_json(technologies));
    }
    if let Some(live_url) = payload.live_url {
        active.live_url = Set(live_url);
    }
    if let Some(source_url) = payload.source_url {
        active.source_url = Set(source_url);
    }
    if let Some(client_name) = payload.client_name {
        active.client_name = Set(client_name);
    }
    if let Some(completed_on) = payload.completed_on {
        active.completed_on = Set(completed_on);
    }
    if let Some(is_featured) = payload.is_featured {
        active.is_featured = Set(is_featured);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(display_order) = payload.display_order {
        active.display_order = Set(display_order);
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
    tag = "Portfolio",
    operation_id = "deletePortfolioItem",
    summary = "Delete a portfolio item",
    params(("id" = i32, Path, description = "Portfolio item ID")),
    responses(
        (status = 204, description = "Portfolio item deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth), fields(id))]
pub async fn delete_portfolio_item(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    find_portfolio_item(&state.db, id).await?;
    portfolio_item::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/reorder",
    tag = "Portfolio",
    operation_id = "reorderPortfolio",
    summary = "Reorder portfolio items",
    description = "Replaces the display order of all portfolio items. The ID array must contain exactly the current items; display_order is assigned by array index starting at 0.",
    request_body = ReorderRequest,
    responses(
        (status = 204, description = "Portfolio reordered"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, payload))]
pub async fn reorder_portfolio(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ReorderRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_reorder_ids(&payload.ids, "portfolio item id")?;

    let txn = state.db.begin().await?;

    let existing: Vec<i32> = portfolio_item::Entity::find()
        .select_only()
        .column(portfolio_item::Column::Id)
        .into_tuple::<i32>()
        .all(&txn)
        .await?;

    let existing_set: std::collections::HashSet<i32> = existing.into_iter().collect();
    let payload_set: std::collections::HashSet<i32> = payload.ids.iter().copied().collect();
    if existing_set != payload_set {
        return Err(AppError::Validation(
            "ids must contain exactly the current portfolio items".into(),
        ));
    }

    for (i, &item_id) in payload.ids.iter().enumerate() {
        portfolio_item::Entity::update_many()
            .filter(portfolio_item::Column::Id.eq(item_id))
            .col_expr(
                portfolio_item::Column::DisplayOrder,
                Expr::value(
                    i32::try_from(i)
                        .map_err(|_| AppError::Validation("Too many items to reorder".into()))?,
                ),
            )
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

fn apply_filters(
    mut select: Select<portfolio_item::Entity>,
    query: &PortfolioListQuery,
) -> Result<Select<portfolio_item::Entity>, AppError> {
    if let Some(ref category) = query.category {
        validate_category(category)?;
        select = select.filter(portfolio_item::Column::Category.eq(category));
    }
    if query.featured == Some(true) {
        select = select.filter(portfolio_item::Column::IsFeatured.eq(true));
    }
    Ok(select)
}

async fn find_portfolio_item<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<portfolio_item::Model, AppError> {
    portfolio_item::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio item not found".into()))
}
