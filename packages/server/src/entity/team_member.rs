use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// URL-safe identifier used in `/team/{slug}` routes.
    #[sea_orm(unique)]
    pub slug: String,

    /// Job title shown under the name (e.g. "Backend Engineer").
    pub role_title: String,

    /// Expertise tags, stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub expertise: Json,

    /// Photo reference into media_ref; NULL when no photo is set.
    pub image_ref: Option<Uuid>,

    pub bio: String, // in Markdown

    /// Client-side sort key; free-form, not gap-free.
    pub display_order: i32,

    /// Hidden from the public site when false.
    pub is_active: bool,

    pub seo_title: Option<String>,
    pub seo_description: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
