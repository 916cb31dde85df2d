//! Registration entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{ParticipationType, RegistrationStatus, TeamData};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the registrations table. `team_data` is JSONB.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub participation_type: String,
    pub team_data: Option<serde_json::Value>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RegistrationEntity> for domain::models::Registration {
    fn from(entity: RegistrationEntity) -> Self {
        let team_data = entity
            .team_data
            .and_then(|value| serde_json::from_value::<TeamData>(value).ok());

        Self {
            id: entity.id,
            event_id: entity.event_id,
            user_id: entity.user_id,
            participation_type: ParticipationType::from_str(&entity.participation_type)
                .unwrap_or(ParticipationType::Individual),
            team_data,
            status: RegistrationStatus::from_str(&entity.status).unwrap_or_default(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
