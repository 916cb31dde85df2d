//! Notification repository for database operations.

use domain::models::notification::CreateNotificationRequest;
use domain::models::{Audience, Notification};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::NotificationEntity;
use crate::metrics::QueryTimer;

/// Repository for announcements.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List notifications, newest first.
    ///
    /// Filtering by `students` or `teachers` also returns notifications
    /// addressed to `all`.
    pub async fn list(&self, audience: Option<Audience>) -> Result<Vec<Notification>, sqlx::Error> {
        let timer = QueryTimer::new("list_notifications");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT id, title, message, audience, event_id, created_at
            FROM notifications
            WHERE $1::text IS NULL OR audience = $1 OR audience = 'all'
            ORDER BY created_at DESC
            "#,
        )
        .bind(audience.map(|a| a.as_str()))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        &self,
        request: &CreateNotificationRequest,
    ) -> Result<Notification, sqlx::Error> {
        let timer = QueryTimer::new("create_notification");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (title, message, audience, event_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, message, audience, event_id, created_at
            "#,
        )
        .bind(&request.title)
        .bind(&request.message)
        .bind(request.audience.as_str())
        .bind(request.event_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_notification");
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
