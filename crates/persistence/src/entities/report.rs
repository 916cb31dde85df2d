//! Report entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ReportEntity {
    pub id: Uuid,
    pub event_id: Option<Uuid>,
    pub title: String,
    pub summary: String,
    pub submitted_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReportEntity> for domain::models::Report {
    fn from(entity: ReportEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            title: entity.title,
            summary: entity.summary,
            submitted_by: entity.submitted_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
