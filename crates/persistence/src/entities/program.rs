//! Program entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ProgramEntity {
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

impl From<ProgramEntity> for domain::models::Program {
    fn from(entity: ProgramEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            category: entity.category,
            coordinator: entity.coordinator,
            starts_on: entity.starts_on,
            ends_on: entity.ends_on,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
