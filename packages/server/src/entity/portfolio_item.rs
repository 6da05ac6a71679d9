use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolio_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(unique)]
    pub slug: String,

    /// One-line teaser for cards and list views.
    pub summary: String,

    pub description: String, // in Markdown

    /// One of: web, mobile, bot, design, other.
    pub category: String,

    /// Technology tags, stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub technologies: Json,

    pub live_url: Option<String>,
    pub source_url: Option<String>,

    pub client_name: Option<String>,
    pub completed_on: Option<Date>,

    /// Shown in the homepage highlight strip when true.
    pub is_featured: bool,
    pub is_active: bool,

    pub display_order: i32,

    pub seo_title: Option<String>,
    pub seo_description: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
