//! Attendance repository for database operations.

use domain::models::{Attendance, AttendanceStatus};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AttendanceEntity;
use crate::metrics::QueryTimer;

/// Repository for attendance marks.
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mark attendance. Re-marking the same (event, user) overwrites the status.
    pub async fn mark(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        status: AttendanceStatus,
    ) -> Result<Attendance, sqlx::Error> {
        let timer = QueryTimer::new("mark_attendance");
        let result = sqlx::query_as::<_, AttendanceEntity>(
            r#"
            INSERT INTO attendance (event_id, user_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (event_id, user_id) DO UPDATE
                SET status = EXCLUDED.status, marked_at = NOW()
            RETURNING id, event_id, user_id, status, marked_at
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Attendance>, sqlx::Error> {
        let timer = QueryTimer::new("list_attendance_for_event");
        let result = sqlx::query_as::<_, AttendanceEntity>(
            r#"
            SELECT id, event_id, user_id, status, marked_at
            FROM attendance
            WHERE event_id = $1
            ORDER BY marked_at
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Attendance>, sqlx::Error> {
        let timer = QueryTimer::new("list_attendance_for_user");
        let result = sqlx::query_as::<_, AttendanceEntity>(
            r#"
            SELECT id, event_id, user_id, status, marked_at
            FROM attendance
            WHERE user_id = $1
            ORDER BY marked_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }
}
