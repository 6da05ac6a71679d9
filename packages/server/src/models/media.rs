use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::media_ref;

/// Response DTO for a single uploaded media file.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MediaResponse {
    /// Media reference ID (UUIDv7); the `/media/{id}` handle.
    #[schema(example = "01936f0e-1234-7abc-8000-000000000001")]
    pub id: String,
    /// Original upload filename.
    #[schema(example = "hero.webp")]
    pub filename: String,
    /// MIME content type.
    #[schema(example = "image/webp")]
    pub content_type: Option<String>,
    /// Blob size in bytes.
    #[schema(example = 142857)]
    pub size: i64,
    /// SHA-256 content hash.
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Response DTO for the media library listing.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MediaListResponse {
    pub media: Vec<MediaResponse>,
    pub total: u64,
}

impl From<media_ref::Model> for MediaResponse {
    fn from(model: media_ref::Model) -> Self {
        Self {
            id: model.id.to_string(),
            filename: model.filename,
            content_type: model.content_type,
            size: model.size,
            content_hash: model.content_hash,
            created_at: model.created_at,
        }
    }
}
