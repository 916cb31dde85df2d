//! Program repository for database operations.

use domain::models::program::{CreateProgramRequest, UpdateProgramRequest};
use domain::models::Program;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ProgramEntity;
use crate::metrics::QueryTimer;

const PROGRAM_COLUMNS: &str =
    "id, name, description, category, coordinator, starts_on, ends_on, created_at, updated_at";

/// Repository for programs (fests and event series).
#[derive(Clone)]
pub struct ProgramRepository {
    pool: PgPool,
}

impl ProgramRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List programs, most recent start first.
    pub async fn list(&self) -> Result<Vec<Program>, sqlx::Error> {
        let timer = QueryTimer::new("list_programs");
        let sql = format!(
            "SELECT {} FROM programs ORDER BY starts_on DESC NULLS LAST, created_at DESC",
            PROGRAM_COLUMNS
        );
        let result = sqlx::query_as::<_, ProgramEntity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Program>, sqlx::Error> {
        let timer = QueryTimer::new("find_program_by_id");
        let sql = format!("SELECT {} FROM programs WHERE id = $1", PROGRAM_COLUMNS);
        let result = sqlx::query_as::<_, ProgramEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn create(&self, request: &CreateProgramRequest) -> Result<Program, sqlx::Error> {
        let timer = QueryTimer::new("create_program");
        let sql = format!(
            "INSERT INTO programs (name, description, category, coordinator, starts_on, ends_on) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            PROGRAM_COLUMNS
        );
        let result = sqlx::query_as::<_, ProgramEntity>(&sql)
            .bind(&request.name)
            .bind(&request.description)
            .bind(&request.category)
            .bind(&request.coordinator)
            .bind(request.starts_on)
            .bind(request.ends_on)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        Ok(result?.into())
    }

    /// Apply a partial update. Absent fields keep their stored value.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateProgramRequest,
    ) -> Result<Option<Program>, sqlx::Error> {
        let timer = QueryTimer::new("update_program");
        let sql = format!(
            r#"
            UPDATE programs SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                coordinator = COALESCE($5, coordinator),
                starts_on = COALESCE($6, starts_on),
                ends_on = COALESCE($7, ends_on),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROGRAM_COLUMNS
        );
        let result = sqlx::query_as::<_, ProgramEntity>(&sql)
            .bind(id)
            .bind(&request.name)
            .bind(&request.description)
            .bind(&request.category)
            .bind(&request.coordinator)
            .bind(request.starts_on)
            .bind(request.ends_on)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_program");
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
