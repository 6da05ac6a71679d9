use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::team_member;
use crate::error::AppError;

use super::shared::{
    double_option, json_to_tags, validate_body_text, validate_tags, validate_title,
};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTeamMemberRequest {
    pub name: String,
    /// Explicit slug; derived from the name when omitted or blank.
    pub slug: Option<String>,
    pub role_title: String,
    #[serde(default)]
    pub expertise: Vec<String>,
    pub image_ref: Option<Uuid>,
    pub bio: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateTeamMemberRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub role_title: Option<String>,
    pub expertise: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_ref: Option<Option<Uuid>>,
    pub bio: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub seo_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub seo_description: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TeamMemberResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub role_title: String,
    pub expertise: Vec<String>,
    pub image_ref: Option<Uuid>,
    pub bio: String,
    pub display_order: i32,
    pub is_active: bool,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<team_member::Model> for TeamMemberResponse {
    fn from(m: team_member::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            role_title: m.role_title,
            expertise: json_to_tags(&m.expertise),
            image_ref: m.image_ref,
            bio: m.bio,
            display_order: m.display_order,
            is_active: m.is_active,
            seo_title: m.seo_title,
            seo_description: m.seo_description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct TeamListQuery {
    /// Case-insensitive name search (admin list only).
    pub search: Option<String>,
}

pub fn validate_create_team_member(req: &CreateTeamMemberRequest) -> Result<(), AppError> {
    validate_title(&req.name, "Name")?;
    validate_title(&req.role_title, "Role title")?;
    validate_body_text(&req.bio, "Bio")?;
    validate_tags(&req.expertise, "expertise tags")?;
    validate_optional_seo(req.seo_title.as_deref(), req.seo_description.as_deref())
}

pub fn validate_update_team_member(req: &UpdateTeamMemberRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_title(name, "Name")?;
    }
    if let Some(ref role_title) = req.role_title {
        validate_title(role_title, "Role title")?;
    }
    if let Some(ref bio) = req.bio {
        validate_body_text(bio, "Bio")?;
    }
    if let Some(ref expertise) = req.expertise {
        validate_tags(expertise, "expertise tags")?;
    }
    validate_optional_seo(
        req.seo_title.as_ref().and_then(|o| o.as_deref()),
        req.seo_description.as_ref().and_then(|o| o.as_deref()),
    )
}

/// SEO fields are optional but bounded when present.
pub fn validate_optional_seo(title: Option<&str>, description: Option<&str>) -> Result<(), AppError> {
    if let Some(title) = title
        && title.chars().count() > 256
    {
        return Err(AppError::Validation(
            "SEO title must be at most 256 characters".into(),
        ));
    }
    if let Some(description) = description
        && description.chars().count() > 512
    {
        return Err(AppError::Validation(
            "SEO description must be at most 512 characters".into(),
        ));
    }
    Ok(())
}
