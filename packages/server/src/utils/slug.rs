/// Slug handling for public detail-page routes.
///
/// A slug is 1-128 characters of lowercase ASCII letters, digits, and
/// single hyphens, with no leading or trailing hyphen. Uniqueness per
/// entity type is enforced by the database; this module only validates
/// shape and derives slugs from titles.

/// Reasons a slug string is rejected.
#[derive(Debug)]
pub enum SlugError {
    Empty,
    TooLong,
    InvalidCharacter,
    BadHyphenPlacement,
}

impl SlugError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Slug cannot be empty",
            Self::TooLong => "Slug exceeds maximum length of 128 characters",
            Self::InvalidCharacter => {
                "Slug may only contain lowercase letters, digits, and hyphens"
            }
            Self::BadHyphenPlacement => {
                "Slug must not start or end with a hyphen, or contain consecutive hyphens"
            }
        }
    }
}

/// Validate a slug, returning the trimmed value.
pub fn validate_slug(slug: &str) -> Result<&str, SlugError> {
    let trimmed = slug.trim();

    if trimmed.is_empty() {
        return Err(SlugError::Empty);
    }
    if trimmed.len() > 128 {
        return Err(SlugError::TooLong);
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(SlugError::InvalidCharacter);
    }
    if trimmed.starts_with('-') || trimmed.ends_with('-') || trimmed.contains("--") {
        return Err(SlugError::BadHyphenPlacement);
    }

    Ok(trimmed)
}

/// Derive a slug from a title or name.
///
/// Lowercases ASCII letters, keeps digits, and collapses every other
/// run of characters into a single hyphen. Non-ASCII characters are
/// dropped rather than transliterated.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug.truncate(128);
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}
