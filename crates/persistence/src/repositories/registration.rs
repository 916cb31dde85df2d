//! Registration repository for database operations.

use async_trait::async_trait;
use domain::models::{NewRegistration, Registration, RegistrationStatus};
use domain::stores::{RegistrationStore, StoreResult};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::RegistrationEntity;
use crate::error::store_error;
use crate::metrics::QueryTimer;

const REGISTRATION_COLUMNS: &str =
    "id, event_id, user_id, participation_type, team_data, status, created_at, updated_at";

/// Repository for event registrations.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List registrations, optionally for one event. Newest first.
    pub async fn list(&self, event_id: Option<Uuid>) -> Result<Vec<Registration>, sqlx::Error> {
        let timer = QueryTimer::new("list_registrations");
        let sql = format!(
            "SELECT {} FROM registrations WHERE ($1::uuid IS NULL OR event_id = $1) \
             ORDER BY created_at DESC",
            REGISTRATION_COLUMNS
        );
        let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_event_and_user");
        let sql = format!(
            "SELECT {} FROM registrations WHERE event_id = $1 AND user_id = $2",
            REGISTRATION_COLUMNS
        );
        let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
            .bind(event_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Insert a registration. A second row for the same (event, user) pair
    /// fails with a unique violation.
    pub async fn create(&self, new: NewRegistration) -> Result<Registration, sqlx::Error> {
        let timer = QueryTimer::new("create_registration");
        let sql = format!(
            "INSERT INTO registrations (event_id, user_id, participation_type, team_data, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            REGISTRATION_COLUMNS
        );
        let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
            .bind(new.event_id)
            .bind(new.user_id)
            .bind(new.participation_type.as_str())
            .bind(new.team_data.as_ref().map(Json))
            .bind(new.status.as_str())
            .fetch_one(&self.pool)
            .await;
        timer.record();
        Ok(result?.into())
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Registration>, sqlx::Error> {
        let timer = QueryTimer::new("find_registrations_by_user");
        let sql = format!(
            "SELECT {} FROM registrations WHERE user_id = $1 ORDER BY created_at DESC",
            REGISTRATION_COLUMNS
        );
        let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    /// Team registrations whose leader or members include the external ID.
    ///
    /// Rosters are stored with uppercase IDs, so containment on the
    /// normalized ID is an exact match served by the GIN index.
    pub async fn find_team_registrations_with_member(
        &self,
        external_id: &str,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        let timer = QueryTimer::new("find_team_registrations_with_member");
        let sql = format!(
            r#"
            SELECT {} FROM registrations
            WHERE participation_type = 'team'
              AND (
                team_data @> jsonb_build_object(
                    'members', jsonb_build_array(jsonb_build_object('externalId', $1::text)))
                OR team_data @> jsonb_build_object(
                    'leader', jsonb_build_object('externalId', $1::text))
              )
            ORDER BY created_at DESC
            "#,
            REGISTRATION_COLUMNS
        );
        let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
            .bind(external_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let timer = QueryTimer::new("update_registration_status");
        let sql = format!(
            "UPDATE registrations SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            REGISTRATION_COLUMNS
        );
        let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_registration");
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}

#[async_trait]
impl RegistrationStore for RegistrationRepository {
    async fn find_for_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Registration>> {
        self.find_by_event_and_user(event_id, user_id)
            .await
            .map_err(store_error)
    }

    async fn create_registration(&self, new: NewRegistration) -> StoreResult<Registration> {
        self.create(new).await.map_err(store_error)
    }

    async fn find_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Registration>> {
        RegistrationRepository::find_by_user(self, user_id)
            .await
            .map_err(store_error)
    }

    async fn find_team_registrations_with_member(
        &self,
        external_id: &str,
    ) -> StoreResult<Vec<Registration>> {
        RegistrationRepository::find_team_registrations_with_member(self, external_id)
            .await
            .map_err(store_error)
    }
}
