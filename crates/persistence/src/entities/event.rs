//! Event entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::ParticipationMode;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub program_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub participation_mode: String,
    pub overall_individual_limit: Option<i32>,
    pub teams_per_department: Option<i32>,
    pub min_team_size: Option<i32>,
    pub max_team_size: Option<i32>,
    pub registration_open: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for domain::models::Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            program_id: entity.program_id,
            title: entity.title,
            description: entity.description,
            venue: entity.venue,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            participation_mode: ParticipationMode::from_str(&entity.participation_mode)
                .unwrap_or_default(),
            overall_individual_limit: entity.overall_individual_limit,
            teams_per_department: entity.teams_per_department,
            min_team_size: entity.min_team_size,
            max_team_size: entity.max_team_size,
            registration_open: entity.registration_open,
            image_url: entity.image_url,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
