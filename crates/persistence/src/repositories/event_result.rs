//! Event result repository for database operations.

use domain::models::event_result::CreateEventResultRequest;
use domain::models::EventResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventResultEntity;
use crate::metrics::QueryTimer;

/// Repository for event placings.
#[derive(Clone)]
pub struct EventResultRepository {
    pool: PgPool,
}

impl EventResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a placing. A second result for the same position is a unique violation.
    pub async fn create(
        &self,
        request: &CreateEventResultRequest,
        external_id: Option<String>,
    ) -> Result<EventResult, sqlx::Error> {
        let timer = QueryTimer::new("create_event_result");
        let result = sqlx::query_as::<_, EventResultEntity>(
            r#"
            INSERT INTO event_results (event_id, position, winner_name, external_id, team_name, prize)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, event_id, position, winner_name, external_id, team_name, prize, created_at
            "#,
        )
        .bind(request.event_id)
        .bind(request.position)
        .bind(&request.winner_name)
        .bind(external_id)
        .bind(&request.team_name)
        .bind(&request.prize)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    /// Results for an event, ordered by position.
    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<EventResult>, sqlx::Error> {
        let timer = QueryTimer::new("list_event_results");
        let result = sqlx::query_as::<_, EventResultEntity>(
            r#"
            SELECT id, event_id, position, winner_name, external_id, team_name, prize, created_at
            FROM event_results
            WHERE event_id = $1
            ORDER BY position
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_event_result");
        let result = sqlx::query("DELETE FROM event_results WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
