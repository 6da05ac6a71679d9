use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Singleton table: the one row (id = 1) holds the company's contact
/// details, read by every public page footer and CTA.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_info")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    pub phone: String,
    pub email: String,
    pub address: String,
    pub working_hours: String,

    /// Social profile links, stored as a JSON object of name -> URL.
    #[sea_orm(column_type = "JsonBinary")]
    pub social_links: Json,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

/// Primary key of the singleton row.
pub const SINGLETON_ID: i32 = 1;
