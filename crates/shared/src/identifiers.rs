//! External ID normalization.
//!
//! External IDs are issued by the college (student, teacher and admin
//! numbers) and are compared case-insensitively everywhere. The stored form
//! is trimmed and uppercased.

/// Normalizes an external ID, returning `None` when nothing is left.
pub fn normalize_external_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Normalizes an optional external ID coming straight off a request body.
pub fn normalize_optional(raw: Option<&str>) -> Option<String> {
    raw.and_then(normalize_external_id)
}
