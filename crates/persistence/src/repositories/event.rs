//! Event repository for database operations.

use async_trait::async_trait;
use domain::models::event::{CreateEventRequest, UpdateEventRequest};
use domain::models::Event;
use domain::stores::{EventCatalog, StoreResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventEntity;
use crate::error::store_error;
use crate::metrics::QueryTimer;

const EVENT_COLUMNS: &str = "id, program_id, title, description, venue, starts_at, ends_at, \
                             participation_mode, overall_individual_limit, teams_per_department, \
                             min_team_size, max_team_size, registration_open, image_url, \
                             created_at, updated_at";

/// Repository for events.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List events, optionally restricted to one program. Soonest first.
    pub async fn list(&self, program_id: Option<Uuid>) -> Result<Vec<Event>, sqlx::Error> {
        let timer = QueryTimer::new("list_events");
        let sql = format!(
            "SELECT {} FROM events WHERE ($1::uuid IS NULL OR program_id = $1) \
             ORDER BY starts_at ASC NULLS LAST, created_at DESC",
            EVENT_COLUMNS
        );
        let result = sqlx::query_as::<_, EventEntity>(&sql)
            .bind(program_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let sql = format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS);
        let result = sqlx::query_as::<_, EventEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn create(&self, request: &CreateEventRequest) -> Result<Event, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let sql = format!(
            r#"
            INSERT INTO events (
                program_id, title, description, venue, starts_at, ends_at, participation_mode,
                overall_individual_limit, teams_per_department, min_team_size, max_team_size,
                registration_open, image_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        );
        let result = sqlx::query_as::<_, EventEntity>(&sql)
            .bind(request.program_id)
            .bind(&request.title)
            .bind(&request.description)
            .bind(&request.venue)
            .bind(request.starts_at)
            .bind(request.ends_at)
            .bind(request.participation_mode.as_str())
            .bind(request.overall_individual_limit)
            .bind(request.teams_per_department)
            .bind(request.min_team_size)
            .bind(request.max_team_size)
            .bind(request.registration_open)
            .bind(&request.image_url)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        Ok(result?.into())
    }

    /// Apply a partial update. Absent fields keep their stored value.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateEventRequest,
    ) -> Result<Option<Event>, sqlx::Error> {
        let timer = QueryTimer::new("update_event");
        let sql = format!(
            r#"
            UPDATE events SET
                program_id = COALESCE($2, program_id),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                venue = COALESCE($5, venue),
                starts_at = COALESCE($6, starts_at),
                ends_at = COALESCE($7, ends_at),
                participation_mode = COALESCE($8, participation_mode),
                overall_individual_limit = COALESCE($9, overall_individual_limit),
                teams_per_department = COALESCE($10, teams_per_department),
                min_team_size = COALESCE($11, min_team_size),
                max_team_size = COALESCE($12, max_team_size),
                registration_open = COALESCE($13, registration_open),
                image_url = COALESCE($14, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        );
        let result = sqlx::query_as::<_, EventEntity>(&sql)
            .bind(id)
            .bind(request.program_id)
            .bind(&request.title)
            .bind(&request.description)
            .bind(&request.venue)
            .bind(request.starts_at)
            .bind(request.ends_at)
            .bind(request.participation_mode.map(|m| m.as_str()))
            .bind(request.overall_individual_limit)
            .bind(request.teams_per_department)
            .bind(request.min_team_size)
            .bind(request.max_team_size)
            .bind(request.registration_open)
            .bind(&request.image_url)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}

#[async_trait]
impl EventCatalog for EventRepository {
    async fn find_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        self.find_by_id(id).await.map_err(store_error)
    }
}
