use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(unique)]
    pub slug: String,

    pub excerpt: String,
    pub content: String, // in Markdown

    /// Cover image reference into media_ref.
    pub image_ref: Option<Uuid>,

    pub author: String,
    pub category: String,

    /// Display label, e.g. "5 min read".
    pub read_time: String,

    /// SEO keywords, stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub keywords: Json,

    pub is_published: bool,

    /// Set on first publish; drafts have NULL.
    pub published_at: Option<DateTimeUtc>,

    /// Incremented server-side by the public view endpoint.
    pub view_count: i64,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
