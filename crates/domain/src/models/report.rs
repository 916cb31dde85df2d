//! Post-event report domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub event_id: Option<Uuid>,
    pub title: String,
    pub summary: String,
    pub submitted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub event_id: Option<Uuid>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 20000, message = "Summary must be 1-20000 characters"))]
    pub summary: String,

    #[validate(length(max = 200, message = "Submitter must be at most 200 characters"))]
    pub submitted_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 20000, message = "Summary must be 1-20000 characters"))]
    pub summary: Option<String>,

    #[validate(length(max = 200, message = "Submitter must be at most 200 characters"))]
    pub submitted_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_report_partial() {
        let request: UpdateReportRequest =
            serde_json::from_str(r#"{"summary":"Attendance was 140."}"#).unwrap();
        assert!(request.title.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_report_requires_title() {
        let request: CreateReportRequest =
            serde_json::from_str(r#"{"title":"","summary":"x"}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
