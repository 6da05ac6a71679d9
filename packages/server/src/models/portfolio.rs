use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::portfolio_item;
use crate::error::AppError;

use super::shared::{
    double_option, json_to_tags, validate_body_text, validate_optional_url, validate_tags,
    validate_title,
};
use super::team::validate_optional_seo;

/// Accepted portfolio categories.
pub const CATEGORIES: &[&str] = &["web", "mobile", "bot", "design", "other"];

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreatePortfolioItemRequest {
    pub title: String,
    /// Explicit slug; derived from the title when omitted or blank.
    pub slug: Option<String>,
    pub summary: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub live_url: Option<String>,
    pub source_url: Option<String>,
    pub client_name: Option<String>,
    pub completed_on: Option<NaiveDate>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdatePortfolioItemRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub technologies: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub live_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub source_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub completed_on: Option<Option<NaiveDate>>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub seo_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub seo_description: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PortfolioItemResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub description: String,
    pub category: String,
    pub technologies: Vec<String>,
    pub live_url: Option<String>,
    pub source_url: Option<String>,
    pub client_name: Option<String>,
    pub completed_on: Option<NaiveDate>,
    pub is_featured: bool,
    pub is_active: bool,
    pub display_order: i32,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<portfolio_item::Model> for PortfolioItemResponse {
    fn from(m: portfolio_item::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            slug: m.slug,
            summary: m.summary,
            description: m.description,
            category: m.category,
            technologies: json_to_tags(&m.technologies),
            live_url: m.live_url,
            source_url: m.source_url,
            client_name: m.client_name,
            completed_on: m.completed_on,
            is_featured: m.is_featured,
            is_active: m.is_active,
            display_order: m.display_order,
            seo_title: m.seo_title,
            seo_description: m.seo_description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct PortfolioListQuery {
    /// Filter to a single category.
    pub category: Option<String>,
    /// When true, only featured items.
    pub featured: Option<bool>,
    /// Case-insensitive title search (admin list only).
    pub search: Option<String>,
}

pub fn validate_category(category: &str) -> Result<(), AppError> {
    if CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "category must be one of: {}",
            CATEGORIES.join(", ")
        )))
    }
}

pub fn validate_create_portfolio_item(req: &CreatePortfolioItemRequest) -> Result<(), AppError> {
    validate_title(&req.title, "Title")?;
    validate_title(&req.summary, "Summary")?;
    validate_body_text(&req.description, "Description")?;
    validate_category(&req.category)?;
    validate_tags(&req.technologies, "technology tags")?;
    validate_optional_url(req.live_url.as_deref(), "live_url")?;
    validate_optional_url(req.source_url.as_deref(), "source_url")?;
    if let Some(ref client) = req.client_name {
        validate_title(client, "Client name")?;
    }
    validate_optional_seo(req.seo_title.as_deref(), req.seo_description.as_deref())
}

pub fn validate_update_portfolio_item(req: &UpdatePortfolioItemRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title, "Title")?;
    }
    if let Some(ref summary) = req.summary {
        validate_title(summary, "Summary")?;
    }
    if let Some(ref description) = req.description {
        validate_body_text(description, "Description")?;
    }
    if let Some(ref category) = req.category {
        validate_category(category)?;
    }
    if let Some(ref technologies) = req.technologies {
        validate_tags(technologies, "technology tags")?;
    }
    validate_optional_url(
        req.live_url.as_ref().and_then(|o| o.as_deref()),
        "live_url",
    )?;
    validate_optional_url(
        req.source_url.as_ref().and_then(|o| o.as_deref()),
        "source_url",
    )?;
    if let Some(Some(ref client)) = req.client_name {
        validate_title(client, "Client name")?;
    }
    validate_optional_seo(
        req.seo_title.as_ref().and_then(|o| o.as_deref()),
        req.seo_description.as_ref().and_then(|o| o.as_deref()),
    )
}
