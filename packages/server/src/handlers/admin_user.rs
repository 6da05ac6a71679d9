use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::admin_user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::admin_user::*;
use crate::state::AppState;
use crate::utils::hash;

#[utoipa::path(
    get,
    path = "/",
    tag = "Admin Users",
    operation_id = "listAdminUsers",
    summary = "List admin accounts",
    responses(
        (status = 200, description = "List of admin users", body = Vec<AdminUserResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth))]
pub async fn list_admin_users(
    _auth: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminUserResponse>>, AppError> {
    let rows = admin_user::Entity::find()
        .order_by_asc(admin_user::Column::Username)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(AdminUserResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Admin Users",
    operation_id = "createAdminUser",
    summary = "Create an admin account",
    request_body = CreateAdminUserRequest,
    responses(
        (status = 201, description = "Admin created", body = AdminUserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Username taken (USERNAME_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, payload), fields(username = %payload.username))]
pub async fn create_admin_user(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAdminUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_admin_user(&payload)?;

    let password_hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = admin_user::ActiveModel {
        username: Set(payload.username.trim().to_string()),
        password: Set(password_hash),
        full_name: Set(payload.full_name.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        is_active: Set(payload.is_active),
        last_login_at: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let user = new_user.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::UsernameTaken,
        _ => AppError::from(e),
    })?;

    Ok((StatusCode::CREATED, Json(AdminUserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Admin Users",
    operation_id = "getAdminUser",
    summary = "Get an admin account",
    params(("id" = i32, Path, description = "Admin user ID")),
    responses(
        (status = 200, description = "Admin details", body = AdminUserResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth), fields(id))]
pub async fn get_admin_user(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AdminUserResponse>, AppError> {
    let user = find_admin_user(&state.db, id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Admin Users",
    operation_id = "updateAdminUser",
    summary = "Update an admin account",
    description = "PATCH semantics; a provided password is re-hashed. Admins cannot deactivate their own account.",
    params(("id" = i32, Path, description = "Admin user ID")),
    request_body = UpdateAdminUserRequest,
    responses(
        (status = 200, description = "Admin updated", body = AdminUserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Username taken or self-deactivation (USERNAME_TAKEN, CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth, payload), fields(id))]
pub async fn update_admin_user(
    auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateAdminUserRequest>,
) -> Result<Json<AdminUserResponse>, AppError> {
    validate_update_admin_user(&payload)?;

    if payload.is_active == Some(false) && id == auth.user_id {
        return Err(AppError::Conflict(
            "Cannot deactivate your own account".into(),
        ));
    }

    if payload == UpdateAdminUserRequest::default() {
        let existing = find_admin_user(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_admin_user(&txn, id).await?;
    let mut active: admin_user::ActiveModel = existing.into();

    if let Some(ref username) = payload.username {
        active.username = Set(username.trim().to_string());
    }
    if let Some(ref password) = payload.password {
        let password_hash = hash::hash_password(password)
            .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;
        active.password = Set(password_hash);
    }
    if let Some(ref full_name) = payload.full_name {
        active.full_name = Set(full_name.trim().to_string());
    }
    if let Some(ref email) = payload.email {
        active.email = Set(email.trim().to_string());
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }

    let user = active.update(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::UsernameTaken,
        _ => AppError::from(e),
    })?;
    txn.commit().await?;

    Ok(Json(user.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Admin Users",
    operation_id = "deleteAdminUser",
    summary = "Delete an admin account",
    description = "Admins cannot delete their own account; a different active admin has to do it.",
    params(("id" = i32, Path, description = "Admin user ID")),
    responses(
        (status = 204, description = "Admin deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Cannot delete own account (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth), fields(id))]
pub async fn delete_admin_user(
    auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    if id == auth.user_id {
        return Err(AppError::Conflict("Cannot delete your own account".into()));
    }

    find_admin_user(&state.db, id).await?;
    admin_user::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_admin_user<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<admin_user::Model, AppError> {
    admin_user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Admin user not found".into()))
}
