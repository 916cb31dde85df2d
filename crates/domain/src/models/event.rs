//! Event domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::registration::ParticipationType;

/// Which participation types an event accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipationMode {
    #[default]
    Individual,
    Team,
    Both,
}

impl ParticipationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationMode::Individual => "individual",
            ParticipationMode::Team => "team",
            ParticipationMode::Both => "both",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "individual" => Some(ParticipationMode::Individual),
            "team" => Some(ParticipationMode::Team),
            "both" => Some(ParticipationMode::Both),
            _ => None,
        }
    }

    /// Whether a registration of the given type fits this mode.
    pub fn accepts(&self, participation: ParticipationType) -> bool {
        matches!(
            (self, participation),
            (ParticipationMode::Both, _)
                | (ParticipationMode::Individual, ParticipationType::Individual)
                | (ParticipationMode::Team, ParticipationType::Team)
        )
    }
}

/// An event within (optionally) a program.
///
/// The limit fields are stored as declared by organizers; registration does
/// not enforce them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub program_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub participation_mode: ParticipationMode,
    pub overall_individual_limit: Option<i32>,
    pub teams_per_department: Option<i32>,
    pub min_team_size: Option<i32>,
    pub max_team_size: Option<i32>,
    pub registration_open: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_registration_open() -> bool {
    true
}

/// Request payload for creating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub program_id: Option<Uuid>,

    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 200, message = "Venue must be at most 200 characters"))]
    pub venue: Option<String>,

    pub starts_at: Option<DateTime<Utc>>,

    pub ends_at: Option<DateTime<Utc>>,

    #[serde(default, alias = "participationType")]
    pub participation_mode: ParticipationMode,

    #[validate(range(min = 1, message = "Limit must be positive"))]
    pub overall_individual_limit: Option<i32>,

    #[validate(range(min = 1, message = "Limit must be positive"))]
    pub teams_per_department: Option<i32>,

    #[validate(range(min = 1, message = "Team size must be positive"))]
    pub min_team_size: Option<i32>,

    #[validate(range(min = 1, message = "Team size must be positive"))]
    pub max_team_size: Option<i32>,

    #[serde(default = "default_registration_open")]
    pub registration_open: bool,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Request payload for updating an event (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub program_id: Option<Uuid>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 200, message = "Venue must be at most 200 characters"))]
    pub venue: Option<String>,

    pub starts_at: Option<DateTime<Utc>>,

    pub ends_at: Option<DateTime<Utc>>,

    #[serde(alias = "participationType")]
    pub participation_mode: Option<ParticipationMode>,

    #[validate(range(min = 1, message = "Limit must be positive"))]
    pub overall_individual_limit: Option<i32>,

    #[validate(range(min = 1, message = "Limit must be positive"))]
    pub teams_per_department: Option<i32>,

    #[validate(range(min = 1, message = "Team size must be positive"))]
    pub min_team_size: Option<i32>,

    #[validate(range(min = 1, message = "Team size must be positive"))]
    pub max_team_size: Option<i32>,

    pub registration_open: Option<bool>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Query parameters for listing events.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsQuery {
    pub program_id: Option<Uuid>,
}

/// Rejects schedules and team sizes that contradict themselves.
pub fn check_event_shape(
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
    min_team_size: Option<i32>,
    max_team_size: Option<i32>,
) -> Result<(), String> {
    if let (Some(start), Some(end)) = (starts_at, ends_at) {
        if end < start {
            return Err("Event cannot end before it starts".to_string());
        }
    }
    if let (Some(min), Some(max)) = (min_team_size, max_team_size) {
        if max < min {
            return Err("Maximum team size cannot be below minimum team size".to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participation_mode_accepts() {
        use ParticipationType::*;
        assert!(ParticipationMode::Individual.accepts(Individual));
        assert!(!ParticipationMode::Individual.accepts(Team));
        assert!(ParticipationMode::Team.accepts(Team));
        assert!(!ParticipationMode::Team.accepts(Individual));
        assert!(ParticipationMode::Both.accepts(Individual));
        assert!(ParticipationMode::Both.accepts(Team));
    }

    #[test]
    fn test_participation_mode_roundtrip_str() {
        for mode in [
            ParticipationMode::Individual,
            ParticipationMode::Team,
            ParticipationMode::Both,
        ] {
            assert_eq!(ParticipationMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(ParticipationMode::from_str("solo"), None);
    }

    #[test]
    fn test_create_event_request_defaults() {
        let request: CreateEventRequest =
            serde_json::from_str(r#"{"title":"Hackathon"}"#).unwrap();
        assert_eq!(request.participation_mode, ParticipationMode::Individual);
        assert!(request.registration_open);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_event_request_participation_type_alias() {
        let request: CreateEventRequest = serde_json::from_str(
            r#"{"title":"Relay","participationType":"team","teamsPerDepartment":2}"#,
        )
        .unwrap();
        assert_eq!(request.participation_mode, ParticipationMode::Team);
        assert_eq!(request.teams_per_department, Some(2));
    }

    #[test]
    fn test_create_event_request_rejects_zero_limit() {
        let request: CreateEventRequest =
            serde_json::from_str(r#"{"title":"Quiz","overallIndividualLimit":0}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_check_event_shape() {
        let now = Utc::now();
        let later = now + chrono::Duration::hours(2);
        assert!(check_event_shape(Some(now), Some(later), Some(2), Some(4)).is_ok());
        assert!(check_event_shape(Some(later), Some(now), None, None).is_err());
        assert!(check_event_shape(None, None, Some(5), Some(3)).is_err());
    }
}
