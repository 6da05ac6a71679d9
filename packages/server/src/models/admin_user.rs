use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::admin_user;
use crate::error::AppError;

use super::shared::{validate_email, validate_title};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateAdminUserRequest {
    /// Unique username (1-32 chars, alphanumeric and underscores).
    #[schema(example = "jane_doe")]
    pub username: String,
    /// Password (8-128 characters).
    pub password: String,
    pub full_name: String,
    pub email: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateAdminUserRequest {
    pub username: Option<String>,
    /// New password; omitting the field keeps the current one.
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminUserResponse {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<admin_user::Model> for AdminUserResponse {
    fn from(m: admin_user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            full_name: m.full_name,
            email: m.email,
            is_active: m.is_active,
            last_login_at: m.last_login_at,
            created_at: m.created_at,
        }
    }
}

pub fn validate_username(username: &str) -> Result<(), AppError> {
    let username = username.trim();
    if username.is_empty() || username.chars().count() > 32 {
        return Err(AppError::Validation(
            "Username must be 1-32 characters".into(),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AppError::Validation(
            "Username must contain only letters, digits, and underscores".into(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < 8 || password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_admin_user(req: &CreateAdminUserRequest) -> Result<(), AppError> {
    validate_username(&req.username)?;
    validate_password(&req.password)?;
    validate_title(&req.full_name, "Full name")?;
    validate_email(&req.email)
}

pub fn validate_update_admin_user(req: &UpdateAdminUserRequest) -> Result<(), AppError> {
    if let Some(ref username) = req.username {
        validate_username(username)?;
    }
    if let Some(ref password) = req.password {
        validate_password(password)?;
    }
    if let Some(ref full_name) = req.full_name {
        validate_title(full_name, "Full name")?;
    }
    if let Some(ref email) = req.email {
        validate_email(email)?;
    }
    Ok(())
}
