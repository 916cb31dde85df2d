//! Event result entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct EventResultEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub position: i16,
    pub winner_name: String,
    pub external_id: Option<String>,
    pub team_name: Option<String>,
    pub prize: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<EventResultEntity> for domain::models::EventResult {
    fn from(entity: EventResultEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            position: entity.position,
            winner_name: entity.winner_name,
            external_id: entity.external_id,
            team_name: entity.team_name,
            prize: entity.prize,
            created_at: entity.created_at,
        }
    }
}
