//! Program (event series / fest) domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A program groups related events, e.g. an annual fest or a workshop series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub coordinator: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a program.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramRequest {
    #[validate(
        length(min = 1, max = 200, message = "Name must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,

    #[validate(length(max = 200, message = "Coordinator must be at most 200 characters"))]
    pub coordinator: Option<String>,

    pub starts_on: Option<NaiveDate>,

    pub ends_on: Option<NaiveDate>,
}

/// Request payload for updating a program (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgramRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,

    #[validate(length(max = 200, message = "Coordinator must be at most 200 characters"))]
    pub coordinator: Option<String>,

    pub starts_on: Option<NaiveDate>,

    pub ends_on: Option<NaiveDate>,
}

/// Rejects date ranges that end before they start.
pub fn check_date_range(
    starts_on: Option<NaiveDate>,
    ends_on: Option<NaiveDate>,
) -> Result<(), String> {
    match (starts_on, ends_on) {
        (Some(start), Some(end)) if end < start => {
            Err("End date cannot be before start date".to_string())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_program_request_deserialization() {
        let json = r#"{"name":"TechFest 2026","startsOn":"2026-02-10","endsOn":"2026-02-12"}"#;
        let request: CreateProgramRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "TechFest 2026");
        assert_eq!(request.starts_on, NaiveDate::from_ymd_opt(2026, 2, 10));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_program_request_empty_name() {
        let request = CreateProgramRequest {
            name: String::new(),
            description: None,
            category: None,
            coordinator: None,
            starts_on: None,
            ends_on: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_check_date_range() {
        let feb10 = NaiveDate::from_ymd_opt(2026, 2, 10);
        let feb12 = NaiveDate::from_ymd_opt(2026, 2, 12);
        assert!(check_date_range(feb10, feb12).is_ok());
        assert!(check_date_range(feb10, feb10).is_ok());
        assert!(check_date_range(None, feb10).is_ok());
        assert!(check_date_range(feb12, feb10).is_err());
    }

    #[test]
    fn test_create_program_request_blank_name() {
        let request: CreateProgramRequest = serde_json::from_str(r#"{"name":"   "}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
