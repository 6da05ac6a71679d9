use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::contact_message;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::message::*;
use crate::models::shared::Pagination;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Messages",
    operation_id = "listMessages",
    summary = "List contact messages",
    description = "Returns contact messages newest first, paginated, with an optional status filter.",
    params(MessageListQuery),
    responses(
        (status = 200, description = "List of messages", body = MessageListResponse),
        (status = 400, description = "Unknown status (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, query))]
pub async fn list_messages(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<MessageListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let mut select = contact_message::Entity::find();

    if let Some(ref status) = query.status {
        if !STATUSES.contains(&status.as_str()) {
            return Err(AppError::Validation(format!(
                "status must be one of: {}",
                STATUSES.join(", ")
            )));
        }
        select = select.filter(contact_message::Column::Status.eq(status));
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let rows = select
        .order_by_desc(contact_message::Column::CreatedAt)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    Ok(Json(MessageListResponse {
        data: rows.into_iter().map(MessageResponse::from).collect(),
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Messages",
    operation_id = "getMessage",
    summary = "Get a contact message",
    description = "Returns the full message. Opening a `new` message marks it `read`.",
    params(("id" = i32, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message details", body = MessageResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth), fields(id))]
pub async fn get_message(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    let message = find_message(&state.db, id).await?;

    // Opening an unread message moves it to `read` so the inbox badge
    // stays honest without a separate mark-read call.
    if message.status == "new" {
        let mut active: contact_message::ActiveModel = message.into();
        active.status = Set("read".to_string());
        active.updated_at = Set(chrono::Utc::now());
        let updated = active.update(&state.db).await?;
        return Ok(Json(updated.into()));
    }

    Ok(Json(message.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Messages",
    operation_id = "updateMessage",
    summary = "Update a message's status or notes",
    description = "PATCH semantics: omit a field to leave it unchanged; admin_notes may be set to null to clear.",
    params(("id" = i32, Path, description = "Message ID")),
    request_body = UpdateMessageRequest,
    responses(
        (status = 200, description = "Message updated", body = MessageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, payload), fields(id))]
pub async fn update_message(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateMessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_update_message(&payload)?;

    if payload == UpdateMessageRequest::default() {
        let existing = find_message(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_message(&txn, id).await?;
    let mut active: contact_message::ActiveModel = existing.into();

    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    match payload.admin_notes {
        Some(Some(notes)) => active.admin_notes = Set(Some(notes.trim().to_string())),
        Some(None) => active.admin_notes = Set(None),
        None => {}
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Messages",
    operation_id = "deleteMessage",
    summary = "Delete a contact message",
    params(("id" = i32, Path, description = "Message ID")),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth), fields(id))]
pub async fn delete_message(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    find_message(&state.db, id).await?;
    contact_message::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_message<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<contact_message::Model, AppError> {
    contact_message::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Message not found".into()))
}
