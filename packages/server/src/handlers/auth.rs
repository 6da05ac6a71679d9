use axum::{Json, extract::State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::admin_user;
use crate::error::AppError;
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::auth::{LoginRequest, LoginResponse, MeResponse, validate_login_request};
use crate::state::AppState;
use crate::utils::{hash, jwt};

/// Handle admin login.
///
/// Unknown usernames, wrong passwords, and deactivated accounts all
/// produce the same `INVALID_CREDENTIALS` response; the distinction is
/// not leaked to the caller.
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let username = payload.username.trim();

    let user = admin_user::Entity::find()
        .filter(admin_user::Column::Username.eq(username))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid || !user.is_active {
        return Err(AppError::InvalidCredentials);
    }

    let token = jwt::sign(
        user.id,
        &user.username,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_hours,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    let username = user.username.clone();
    let full_name = user.full_name.clone();

    let mut active: admin_user::ActiveModel = user.into();
    active.last_login_at = Set(Some(chrono::Utc::now()));
    active.update(&state.db).await?;

    Ok(Json(LoginResponse {
        token,
        username,
        full_name,
    }))
}

/// Return the current authenticated admin's profile.
#[instrument(skip(state, auth), fields(user_id = auth.user_id))]
pub async fn me(auth: AuthAdmin, State(state): State<AppState>) -> Result<Json<MeResponse>, AppError> {
    let user = admin_user::Entity::find_by_id(auth.user_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::TokenInvalid)?;

    Ok(Json(MeResponse {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        email: user.email,
        last_login_at: user.last_login_at,
    }))
}
