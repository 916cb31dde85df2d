//! Attendance entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::AttendanceStatus;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct AttendanceEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub marked_at: DateTime<Utc>,
}

impl From<AttendanceEntity> for domain::models::Attendance {
    fn from(entity: AttendanceEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            user_id: entity.user_id,
            status: AttendanceStatus::from_str(&entity.status).unwrap_or_default(),
            marked_at: entity.marked_at,
        }
    }
}
