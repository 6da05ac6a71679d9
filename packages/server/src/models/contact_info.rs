use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::contact_info;
use crate::error::AppError;

use super::shared::{validate_email, validate_optional_url, validate_title};

/// Full replacement of the contact-info singleton. Every field is
/// required; a partial edit round-trips through GET first.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateContactInfoRequest {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub working_hours: String,
    /// Social profile links as a name -> URL map.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub social_links: serde_json::Map<String, serde_json::Value>,
}

pub fn validate_update_contact_info(req: &UpdateContactInfoRequest) -> Result<(), AppError> {
    validate_title(&req.phone, "Phone")?;
    validate_email(&req.email)?;
    validate_title(&req.address, "Address")?;
    validate_title(&req.working_hours, "Working hours")?;
    if req.social_links.len() > 16 {
        return Err(AppError::Validation("Too many social links: max 16".into()));
    }
    for (name, url) in &req.social_links {
        validate_title(name, "Social link name")?;
        let url = url
            .as_str()
            .ok_or_else(|| AppError::Validation("Social link values must be URLs".into()))?;
        validate_optional_url(Some(url), "social link")?;
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContactInfoResponse {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub working_hours: String,
    #[schema(value_type = Object)]
    pub social_links: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl From<contact_info::Model> for ContactInfoResponse {
    fn from(m: contact_info::Model) -> Self {
        Self {
            phone: m.phone,
            email: m.email,
            address: m.address,
            working_hours: m.working_hours,
            social_links: m.social_links,
            updated_at: m.updated_at,
        }
    }
}
