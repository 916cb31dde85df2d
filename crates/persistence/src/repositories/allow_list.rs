//! Allow-list repository: the three identity directories.

use async_trait::async_trait;
use domain::models::{AllowListEntry, Role};
use domain::stores::{IdentityDirectory, StoreResult};
use sqlx::PgPool;

use crate::entities::AllowListEntryEntity;
use crate::error::store_error;
use crate::metrics::QueryTimer;

/// Table backing each role's allow-list.
fn table(role: Role) -> &'static str {
    match role {
        Role::Student => "allowed_students",
        Role::Teacher => "allowed_teachers",
        Role::Admin => "allowed_admins",
    }
}

/// Only the admin table carries a secret hash.
fn secret_column(role: Role) -> &'static str {
    match role {
        Role::Admin => "secret_hash",
        Role::Student | Role::Teacher => "NULL::TEXT AS secret_hash",
    }
}

/// Repository over `allowed_students`, `allowed_teachers` and `allowed_admins`.
#[derive(Clone)]
pub struct AllowListRepository {
    pool: PgPool,
}

impl AllowListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(
        &self,
        role: Role,
        external_id: &str,
    ) -> Result<Option<AllowListEntry>, sqlx::Error> {
        let timer = QueryTimer::new("find_allow_list_entry");
        let sql = format!(
            "SELECT id, external_id, email, {}, created_at, updated_at FROM {} WHERE external_id = $1",
            secret_column(role),
            table(role)
        );
        let result = sqlx::query_as::<_, AllowListEntryEntity>(&sql)
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?.map(|e| e.into_domain(role)))
    }

    pub async fn list(&self, role: Role) -> Result<Vec<AllowListEntry>, sqlx::Error> {
        let timer = QueryTimer::new("list_allow_list_entries");
        let sql = format!(
            "SELECT id, external_id, email, {}, created_at, updated_at FROM {} ORDER BY external_id",
            secret_column(role),
            table(role)
        );
        let result = sqlx::query_as::<_, AllowListEntryEntity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        Ok(result?.into_iter().map(|e| e.into_domain(role)).collect())
    }

    pub async fn create(
        &self,
        role: Role,
        external_id: &str,
        email: &str,
    ) -> Result<AllowListEntry, sqlx::Error> {
        let timer = QueryTimer::new("create_allow_list_entry");
        let sql = format!(
            "INSERT INTO {} (external_id, email) VALUES ($1, $2) \
             RETURNING id, external_id, email, {}, created_at, updated_at",
            table(role),
            secret_column(role)
        );
        let result = sqlx::query_as::<_, AllowListEntryEntity>(&sql)
            .bind(external_id)
            .bind(email)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        Ok(result?.into_domain(role))
    }

    pub async fn update_email(
        &self,
        role: Role,
        external_id: &str,
        email: &str,
    ) -> Result<Option<AllowListEntry>, sqlx::Error> {
        let timer = QueryTimer::new("update_allow_list_email");
        let sql = format!(
            "UPDATE {} SET email = $2, updated_at = NOW() WHERE external_id = $1 \
             RETURNING id, external_id, email, {}, created_at, updated_at",
            table(role),
            secret_column(role)
        );
        let result = sqlx::query_as::<_, AllowListEntryEntity>(&sql)
            .bind(external_id)
            .bind(email)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?.map(|e| e.into_domain(role)))
    }

    /// Inserts the admin entry or replaces its email and secret hash.
    pub async fn upsert_admin(
        &self,
        external_id: &str,
        email: &str,
        secret_hash: &str,
    ) -> Result<AllowListEntry, sqlx::Error> {
        let timer = QueryTimer::new("upsert_admin_entry");
        let result = sqlx::query_as::<_, AllowListEntryEntity>(
            r#"
            INSERT INTO allowed_admins (external_id, email, secret_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (external_id) DO UPDATE
                SET email = EXCLUDED.email,
                    secret_hash = EXCLUDED.secret_hash,
                    updated_at = NOW()
            RETURNING id, external_id, email, secret_hash, created_at, updated_at
            "#,
        )
        .bind(external_id)
        .bind(email)
        .bind(secret_hash)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_domain(Role::Admin))
    }

    pub async fn delete(&self, role: Role, external_id: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_allow_list_entry");
        let sql = format!("DELETE FROM {} WHERE external_id = $1", table(role));
        let result = sqlx::query(&sql)
            .bind(external_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}

#[async_trait]
impl IdentityDirectory for AllowListRepository {
    async fn find_entry(
        &self,
        role: Role,
        external_id: &str,
    ) -> StoreResult<Option<AllowListEntry>> {
        self.find(role, external_id).await.map_err(store_error)
    }

    async fn list_entries(&self, role: Role) -> StoreResult<Vec<AllowListEntry>> {
        self.list(role).await.map_err(store_error)
    }

    async fn create_entry(
        &self,
        role: Role,
        external_id: &str,
        email: &str,
    ) -> StoreResult<AllowListEntry> {
        self.create(role, external_id, email)
            .await
            .map_err(store_error)
    }

    async fn update_email(
        &self,
        role: Role,
        external_id: &str,
        email: &str,
    ) -> StoreResult<Option<AllowListEntry>> {
        AllowListRepository::update_email(self, role, external_id, email)
            .await
            .map_err(store_error)
    }

    async fn upsert_admin(
        &self,
        external_id: &str,
        email: &str,
        secret_hash: &str,
    ) -> StoreResult<AllowListEntry> {
        AllowListRepository::upsert_admin(self, external_id, email, secret_hash)
            .await
            .map_err(store_error)
    }

    async fn delete_entry(&self, role: Role, external_id: &str) -> StoreResult<bool> {
        self.delete(role, external_id).await.map_err(store_error)
    }
}
