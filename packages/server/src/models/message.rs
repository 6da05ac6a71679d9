use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::contact_message;
use crate::error::AppError;

pub use super::shared::Pagination;
use super::shared::{double_option, validate_body_text, validate_email, validate_title};

/// Message lifecycle states, in the order the inbox moves through them.
pub const STATUSES: &[&str] = &["new", "read", "replied", "archived"];

/// Public contact-form submission.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ContactFormRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub body: String,
}

pub fn validate_contact_form(req: &ContactFormRequest) -> Result<(), AppError> {
    validate_title(&req.name, "Name")?;
    validate_email(&req.email)?;
    if let Some(ref phone) = req.phone {
        let phone = phone.trim();
        if !phone.is_empty()
            && (phone.len() > 32
                || !phone
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')')))
        {
            return Err(AppError::Validation("Invalid phone number".into()));
        }
    }
    validate_title(&req.subject, "Subject")?;
    validate_body_text(&req.body, "Message body")?;
    Ok(())
}

/// Admin-side status/notes update.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateMessageRequest {
    /// One of: new, read, replied, archived.
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub admin_notes: Option<Option<String>>,
}

pub fn validate_update_message(req: &UpdateMessageRequest) -> Result<(), AppError> {
    if let Some(ref status) = req.status
        && !STATUSES.contains(&status.as_str())
    {
        return Err(AppError::Validation(format!(
            "status must be one of: {}",
            STATUSES.join(", ")
        )));
    }
    if let Some(Some(ref notes)) = req.admin_notes
        && notes.chars().count() > 4096
    {
        return Err(AppError::Validation(
            "Admin notes must be at most 4096 characters".into(),
        ));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<contact_message::Model> for MessageResponse {
    fn from(m: contact_message::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            subject: m.subject,
            body: m.body,
            status: m.status,
            admin_notes: m.admin_notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageListResponse {
    pub data: Vec<MessageResponse>,
    pub pagination: Pagination,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct MessageListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Filter to a single status.
    pub status: Option<String>,
}

/// Response to a successful contact-form submission.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ContactFormResponse {
    pub id: i32,
}
