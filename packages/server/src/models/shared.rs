use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;
use crate::utils::slug::{slugify, validate_slug};

/// Pagination metadata included in list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 20)]
    pub per_page: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Total number of pages.
    #[schema(example = 3)]
    pub total_pages: u64,
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Ordered ID list for reorder endpoints. Display order is assigned by
/// array index starting at 0.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ReorderRequest {
    pub ids: Vec<i32>,
}

/// Validate a trimmed title or name (1-256 Unicode characters).
pub fn validate_title(title: &str, field: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation(format!(
            "{field} must be 1-256 characters"
        )));
    }
    Ok(())
}

/// Validate a required body-text field (non-empty, at most 1 MB).
pub fn validate_body_text(text: &str, field: &str) -> Result<(), AppError> {
    if text.trim().is_empty() || text.len() > 1_000_000 {
        return Err(AppError::Validation(format!(
            "{field} must be non-empty and at most 1MB"
        )));
    }
    Ok(())
}

/// Validate an email address. A full RFC parse buys nothing here; the
/// check rejects obvious garbage and the mailer bounces the rest.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    let valid = email.len() <= 320
        && email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(AppError::Validation("Invalid email address".into()));
    }
    Ok(())
}

/// Validate an optional link field (http/https, at most 2048 chars).
pub fn validate_optional_url(url: Option<&str>, field: &str) -> Result<(), AppError> {
    if let Some(url) = url {
        let url = url.trim();
        if url.len() > 2048 || !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Validation(format!(
                "{field} must be an http(s) URL of at most 2048 characters"
            )));
        }
    }
    Ok(())
}

/// Validate a tag list (expertise, technologies, keywords).
pub fn validate_tags(tags: &[String], field: &str) -> Result<(), AppError> {
    if tags.len() > 32 {
        return Err(AppError::Validation(format!("Too many {field}: max 32")));
    }
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || tag.chars().count() > 64 {
            return Err(AppError::Validation(format!(
                "Each {field} entry must be 1-64 characters"
            )));
        }
    }
    Ok(())
}

/// Convert a tag list to its stored JSON form, trimming entries.
pub fn tags_to_json(tags: &[String]) -> serde_json::Value {
    serde_json::Value::Array(
        tags.iter()
            .map(|t| serde_json::Value::String(t.trim().to_string()))
            .collect(),
    )
}

/// Read a stored JSON tag array back into strings. Non-string entries
/// are skipped rather than failing the whole row.
pub fn json_to_tags(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// Resolve the slug for a new row: use the explicit one when provided,
/// otherwise derive it from the title. Either way the result must pass
/// slug validation.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, AppError> {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => validate_slug(slug)
            .map(str::to_string)
            .map_err(|e| AppError::Validation(e.message().into())),
        None => {
            let derived = slugify(title);
            validate_slug(&derived)
                .map(str::to_string)
                .map_err(|_| AppError::Validation("Cannot derive a slug from the title".into()))
        }
    }
}

/// Validate an ordered ID list for reorder operations (non-empty, no
/// duplicates).
pub fn validate_reorder_ids(ids: &[i32], name: &str) -> Result<(), AppError> {
    if ids.is_empty() {
        return Err(AppError::Validation(format!("{name}s must not be empty")));
    }
    let mut seen = HashSet::new();
    for &id in ids {
        if !seen.insert(id) {
            return Err(AppError::Validation(format!(
                "Duplicate {name} {id} in reorder list"
            )));
        }
    }
    Ok(())
}
