//! Report repository for database operations.

use domain::models::report::{CreateReportRequest, UpdateReportRequest};
use domain::models::Report;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ReportEntity;
use crate::metrics::QueryTimer;

const REPORT_COLUMNS: &str = "id, event_id, title, summary, submitted_by, created_at, updated_at";

/// Repository for post-event reports.
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Report>, sqlx::Error> {
        let timer = QueryTimer::new("list_reports");
        let sql = format!("SELECT {} FROM reports ORDER BY created_at DESC", REPORT_COLUMNS);
        let result = sqlx::query_as::<_, ReportEntity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Report>, sqlx::Error> {
        let timer = QueryTimer::new("find_report_by_id");
        let sql = format!("SELECT {} FROM reports WHERE id = $1", REPORT_COLUMNS);
        let result = sqlx::query_as::<_, ReportEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn create(&self, request: &CreateReportRequest) -> Result<Report, sqlx::Error> {
        let timer = QueryTimer::new("create_report");
        let sql = format!(
            "INSERT INTO reports (event_id, title, summary, submitted_by) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            REPORT_COLUMNS
        );
        let result = sqlx::query_as::<_, ReportEntity>(&sql)
            .bind(request.event_id)
            .bind(&request.title)
            .bind(&request.summary)
            .bind(&request.submitted_by)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        Ok(result?.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateReportRequest,
    ) -> Result<Option<Report>, sqlx::Error> {
        let timer = QueryTimer::new("update_report");
        let sql = format!(
            r#"
            UPDATE reports SET
                title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                submitted_by = COALESCE($4, submitted_by),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            REPORT_COLUMNS
        );
        let result = sqlx::query_as::<_, ReportEntity>(&sql)
            .bind(id)
            .bind(&request.title)
            .bind(&request.summary)
            .bind(&request.submitted_by)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_report");
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
