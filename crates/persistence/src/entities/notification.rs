//! Notification entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Audience;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub audience: String,
    pub event_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationEntity> for domain::models::Notification {
    fn from(entity: NotificationEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            message: entity.message,
            audience: Audience::from_str(&entity.audience).unwrap_or_default(),
            event_id: entity.event_id,
            created_at: entity.created_at,
        }
    }
}
