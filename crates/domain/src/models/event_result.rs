//! Event result (podium) domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A placing at an event. Unique per (event, position).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResult {
    pub id: Uuid,
    pub event_id: Uuid,
    pub position: i16,
    pub winner_name: String,
    pub external_id: Option<String>,
    pub team_name: Option<String>,
    pub prize: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResultRequest {
    pub event_id: Uuid,

    #[validate(range(min = 1, max = 100, message = "Position must be between 1 and 100"))]
    pub position: i16,

    #[validate(length(min = 1, max = 200, message = "Winner name must be 1-200 characters"))]
    pub winner_name: String,

    pub external_id: Option<String>,

    #[validate(length(max = 200, message = "Team name must be at most 200 characters"))]
    pub team_name: Option<String>,

    #[validate(length(max = 200, message = "Prize must be at most 200 characters"))]
    pub prize: Option<String>,
}
