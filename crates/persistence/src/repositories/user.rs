//! User repository for database operations.

use async_trait::async_trait;
use domain::models::{NewUser, User};
use domain::stores::{CredentialStore, StoreResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::UserEntity;
use crate::error::store_error;
use crate::metrics::QueryTimer;

const USER_COLUMNS: &str = "id, external_id, email, secret_hash, role, name, department, phone, \
                            year_of_study, created_at, updated_at";

/// Repository for user accounts.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let result = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Find a user by normalized external ID.
    pub async fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_external_id");
        let sql = format!("SELECT {} FROM users WHERE external_id = $1", USER_COLUMNS);
        let result = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Whether any account uses this email, ignoring case.
    pub async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("user_email_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a new user. Unique violations surface as database errors.
    pub async fn create(&self, new_user: NewUser) -> Result<User, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let sql = format!(
            "INSERT INTO users (external_id, email, secret_hash, role, name, department, phone, year_of_study) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            USER_COLUMNS
        );
        let result = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(&new_user.external_id)
            .bind(&new_user.email)
            .bind(&new_user.secret_hash)
            .bind(new_user.role.as_str())
            .bind(&new_user.name)
            .bind(&new_user.department)
            .bind(&new_user.phone)
            .bind(new_user.year_of_study)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        Ok(result?.into())
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_external_id(&self, external_id: &str) -> StoreResult<Option<User>> {
        UserRepository::find_by_external_id(self, external_id)
            .await
            .map_err(store_error)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        UserRepository::find_by_id(self, id)
            .await
            .map_err(store_error)
    }

    async fn email_taken(&self, email: &str) -> StoreResult<bool> {
        self.email_exists(email).await.map_err(store_error)
    }

    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        self.create(new_user).await.map_err(store_error)
    }
}
