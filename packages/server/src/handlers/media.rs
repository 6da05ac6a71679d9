use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, body::Body};
use chrono::Utc;
use common::storage::{BlobStore, BoxReader, ContentHash};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{media_object, media_ref};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::models::media::{MediaListResponse, MediaResponse};
use crate::state::AppState;

pub fn media_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(16 * 1024 * 1024) // 16 MB, above the 8 MB blob cap plus multipart overhead
}

/// Content types accepted for site media.
const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/avif",
    "image/gif",
    "image/jpeg",
    "image/png",
    "image/svg+xml",
    "image/webp",
];

#[utoipa::path(
    post,
    path = "/",
    tag = "Media",
    operation_id = "uploadMedia",
    summary = "Upload an image",
    description = "Uploads an image into the media library. The `file` multipart field is required and must carry a filename with an image extension. Identical content is stored once.",
    request_body(content_type = "multipart/form-data", description = "Image file upload"),
    responses(
        (status = 201, description = "Media stored", body = MediaResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth, multipart))]
pub async fn upload_media(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file_result: Option<(ContentHash, i64)> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(|s| s.to_string());
            file_result = Some(
                stream_field_to_store(
                    field,
                    &*state.blob_store,
                    state.config.storage.max_blob_size,
                )
                .await?,
            );
        }
        // Ignore unknown fields.
    }

    let (hash, size) =
        file_result.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;
    let filename = file_name
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;

    let content_type = mime_guess::from_path(&filename)
        .first()
        .map(|m| m.to_string())
        .ok_or_else(|| AppError::Validation("Unrecognized file extension".into()))?;
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::Validation(format!(
            "Unsupported media type '{content_type}'; images only"
        )));
    }

    let media_obj = media_object::ActiveModel {
        content_hash: Set(hash.to_hex()),
        size: Set(size),
        created_at: Set(Utc::now()),
    };
    media_object::Entity::insert(media_obj)
        .on_conflict(
            OnConflict::column(media_object::Column::ContentHash)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&state.db)
        .await?;

    let new_ref = media_ref::ActiveModel {
        id: Set(Uuid::now_v7()),
        content_hash: Set(hash.to_hex()),
        filename: Set(filename),
        content_type: Set(Some(content_type)),
        size: Set(size),
        created_at: Set(Utc::now()),
    };
    let saved = new_ref.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(MediaResponse::from(saved))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Media",
    operation_id = "listMedia",
    summary = "List the media library",
    responses(
        (status = 200, description = "Media list", body = MediaListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth))]
pub async fn list_media(
    _auth: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<MediaListResponse>, AppError> {
    let refs = media_ref::Entity::find()
        .order_by_desc(media_ref::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let total = refs.len() as u64;
    let media = refs.into_iter().map(MediaResponse::from).collect();

    Ok(Json(MediaListResponse { media, total }))
}

#[utoipa::path(
    delete,
    path = "/{ref_id}",
    tag = "Media",
    operation_id = "deleteMedia",
    summary = "Delete a media file",
    description = "Removes the media reference. When no other reference shares the content, the underlying blob is deleted too.",
    params(("ref_id" = String, Path, description = "Media reference ID (UUID)")),
    responses(
        (status = 204, description = "Media deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth), fields(ref_id))]
pub async fn delete_media(
    _auth: AuthAdmin,
    State(state): State<AppState>,
    Path(ref_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let ref_uuid =
        Uuid::parse_str(&ref_id).map_err(|_| AppError::Validation("Invalid media ID".into()))?;

    let media = media_ref::Entity::find_by_id(ref_uuid)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Media not found".into()))?;

    media_ref::Entity::delete_by_id(ref_uuid)
        .exec(&state.db)
        .await?;

    let remaining = media_ref::Entity::find()
        .filter(media_ref::Column::ContentHash.eq(&media.content_hash))
        .count(&state.db)
        .await?;

    if remaining == 0 {
        media_object::Entity::delete_by_id(media.content_hash.clone())
            .exec(&state.db)
            .await?;
        // The row is gone either way; losing the blob cleanup only leaks
        // storage, so log and move on.
        match ContentHash::from_hex(&media.content_hash) {
            Ok(hash) => {
                if let Err(e) = state.blob_store.delete(&hash).await {
                    tracing::warn!("Failed to delete blob {}: {e}", media.content_hash);
                }
            }
            Err(e) => tracing::warn!("Stored content hash unparsable: {e}"),
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{ref_id}",
    tag = "Media",
    operation_id = "serveMedia",
    summary = "Serve a stored image",
    description = "Streams the image with caching headers. Supports ETag-based caching via If-None-Match. Public endpoint.",
    params(("ref_id" = String, Path, description = "Media reference ID (UUID)")),
    responses(
        (status = 200, description = "Image content"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers), fields(ref_id))]
pub async fn serve_media(
    State(state): State<AppState>,
    Path(ref_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let ref_uuid =
        Uuid::parse_str(&ref_id).map_err(|_| AppError::Validation("Invalid media ID".into()))?;

    let media = media_ref::Entity::find_by_id(ref_uuid)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Media not found".into()))?;

    build_media_response(&media, &headers, &*state.blob_store).await
}

/// Build a streaming response from a `media_ref::Model`.
async fn build_media_response(
    media: &media_ref::Model,
    headers: &HeaderMap,
    blob_store: &dyn BlobStore,
) -> Result<Response, AppError> {
    let etag_value = format!("\"{}\"", media.content_hash);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let hash = ContentHash::from_hex(&media.content_hash)?;
    let reader = blob_store.get_stream(&hash).await?;
    let stream = ReaderStream::new(reader);
    let body = Body::from_stream(stream);

    let content_type = media
        .content_type
        .as_deref()
        .unwrap_or("application/octet-stream");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, media.size.to_string())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_value(&media.filename),
        )
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}

/// Build a safe `Content-Disposition` header value.
fn content_disposition_value(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "download".to_string()
    } else {
        ascii_safe
    };

    // RFC 5987 percent-encoding for filename*.
    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => String::from(b as char),
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("inline; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}

/// Stream a multipart field to blob storage via a temp file.
async fn stream_field_to_store(
    mut field: axum::extract::multipart::Field<'_>,
    blob_store: &dyn BlobStore,
    max_size: u64,
) -> Result<(ContentHash, i64), AppError> {
    let temp_path = std::env::temp_dir().join(format!("vitrine-upload-{}", Uuid::new_v4()));

    let result = async {
        let mut temp_file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create temp file: {e}")))?;

        let mut total_size: u64 = 0;

        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
        {
            total_size += chunk.len() as u64;
            if total_size > max_size {
                return Err(AppError::Validation(format!(
                    "File exceeds maximum size of {max_size} bytes"
                )));
            }
            temp_file
                .write_all(&chunk)
                .await
                .map_err(|e| AppError::Internal(format!("Temp file write failed: {e}")))?;
        }

        temp_file
            .flush()
            .await
            .map_err(|e| AppError::Internal(format!("Temp file flush failed: {e}")))?;
        drop(temp_file);

        let file = tokio::fs::File::open(&temp_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to reopen temp file: {e}")))?;
        let reader: BoxReader = Box::new(file);
        let hash = blob_store.put_stream(reader).await?;

        Ok((hash, i64::try_from(total_size).unwrap_or(i64::MAX)))
    }
    .await;

    // Best effort.
    let _ = tokio::fs::remove_file(&temp_path).await;

    result
}
