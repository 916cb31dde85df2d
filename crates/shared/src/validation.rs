//! Common validation utilities used by `validator` derives.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Maximum length of an external ID after normalization.
pub const MAX_EXTERNAL_ID_LEN: usize = 32;

lazy_static! {
    static ref EXTERNAL_ID_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

/// Validates the character set and length of an external ID.
///
/// Case is not checked; IDs are uppercased before any lookup.
pub fn validate_external_id(id: &str) -> Result<(), ValidationError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("external_id_required");
        err.message = Some("External ID is required".into());
        return Err(err);
    }
    if trimmed.len() > MAX_EXTERNAL_ID_LEN || !EXTERNAL_ID_PATTERN.is_match(trimmed) {
        let mut err = ValidationError::new("external_id_format");
        err.message = Some("Invalid ID format".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a string is not blank after trimming.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    #[test]
    fn test_validate_external_id_accepts_common_forms() {
        assert!(validate_external_id("SFA001").is_ok());
        assert!(validate_external_id("aed-2024_7").is_ok());
        assert!(validate_external_id(" ADMIN001 ").is_ok());
    }

    #[test]
    fn test_validate_external_id_rejects_blank() {
        let err = validate_external_id("  ").unwrap_err();
        assert_eq!(err.code, "external_id_required");
    }

    #[test]
    fn test_validate_external_id_rejects_symbols() {
        assert!(validate_external_id("SFA 001").is_err());
        assert!(validate_external_id("SFA001;DROP").is_err());
    }

    #[test]
    fn test_validate_external_id_rejects_overlong() {
        let id = "S".repeat(MAX_EXTERNAL_ID_LEN + 1);
        assert!(validate_external_id(&id).is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("x").is_ok());
        assert!(validate_not_blank(" \t").is_err());
    }

    #[test]
    fn test_sentences_are_not_external_ids() {
        for _ in 0..20 {
            let sentence: String = Sentence(3..6).fake();
            assert!(validate_not_blank(&sentence).is_ok());
            assert!(validate_external_id(&sentence).is_err());
        }
    }
}
