use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::blog_post;
use crate::error::AppError;

pub use super::shared::Pagination;
use super::shared::{
    double_option, json_to_tags, validate_body_text, validate_tags, validate_title,
};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateBlogPostRequest {
    pub title: String,
    /// Explicit slug; derived from the title when omitted or blank.
    pub slug: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub image_ref: Option<Uuid>,
    pub author: String,
    pub category: String,
    /// Display label like "5 min read"; estimated from the content
    /// length when omitted.
    pub read_time: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateBlogPostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_ref: Option<Option<Uuid>>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub read_time: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogPostResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image_ref: Option<Uuid>,
    pub author: String,
    pub category: String,
    pub read_time: String,
    pub keywords: Vec<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<blog_post::Model> for BlogPostResponse {
    fn from(m: blog_post::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            slug: m.slug,
            excerpt: m.excerpt,
            content: m.content,
            image_ref: m.image_ref,
            author: m.author,
            category: m.category,
            read_time: m.read_time,
            keywords: json_to_tags(&m.keywords),
            is_published: m.is_published,
            published_at: m.published_at,
            view_count: m.view_count,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// List row; omits the full content column.
#[derive(Serialize, FromQueryResult, utoipa::ToSchema)]
pub struct BlogListItem {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub image_ref: Option<Uuid>,
    pub author: String,
    pub category: String,
    pub read_time: String,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogListResponse {
    pub data: Vec<BlogListItem>,
    pub pagination: Pagination,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct BlogListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Case-insensitive title search.
    pub search: Option<String>,
    pub category: Option<String>,
}

/// Response for the public view-count increment endpoint.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ViewCountResponse {
    pub view_count: i64,
}

/// Estimate a "N min read" label from the content at ~200 words/min.
pub fn estimate_read_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(200).max(1);
    format!("{minutes} min read")
}

pub fn validate_create_blog_post(req: &CreateBlogPostRequest) -> Result<(), AppError> {
    validate_title(&req.title, "Title")?;
    validate_title(&req.excerpt, "Excerpt")?;
    validate_body_text(&req.content, "Content")?;
    validate_title(&req.author, "Author")?;
    validate_title(&req.category, "Category")?;
    if let Some(ref read_time) = req.read_time {
        validate_title(read_time, "Read time")?;
    }
    validate_tags(&req.keywords, "keywords")
}

pub fn validate_update_blog_post(req: &UpdateBlogPostRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title, "Title")?;
    }
    if let Some(ref excerpt) = req.excerpt {
        validate_title(excerpt, "Excerpt")?;
    }
    if let Some(ref content) = req.content {
        validate_body_text(content, "Content")?;
    }
    if let Some(ref author) = req.author {
        validate_title(author, "Author")?;
    }
    if let Some(ref category) = req.category {
        validate_title(category, "Category")?;
    }
    if let Some(ref read_time) = req.read_time {
        validate_title(read_time, "Read time")?;
    }
    if let Some(ref keywords) = req.keywords {
        validate_tags(keywords, "keywords")?;
    }
    Ok(())
}
