//! Rating repository for database operations.

use domain::models::rating::SubmitRatingRequest;
use domain::models::Rating;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::RatingEntity;
use crate::metrics::QueryTimer;

/// Repository for event ratings.
#[derive(Clone)]
pub struct RatingRepository {
    pool: PgPool,
}

impl RatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Submit a rating, replacing the user's earlier rating of the same event.
    pub async fn upsert(&self, request: &SubmitRatingRequest) -> Result<Rating, sqlx::Error> {
        let timer = QueryTimer::new("upsert_rating");
        let result = sqlx::query_as::<_, RatingEntity>(
            r#"
            INSERT INTO ratings (event_id, user_id, score, comment)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (event_id, user_id) DO UPDATE
                SET score = EXCLUDED.score,
                    comment = EXCLUDED.comment,
                    updated_at = NOW()
            RETURNING id, event_id, user_id, score, comment, created_at, updated_at
            "#,
        )
        .bind(request.event_id)
        .bind(request.user_id)
        .bind(request.score)
        .bind(&request.comment)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    pub async fn list_for_event(&self, event_id: Uuid) -> Result<Vec<Rating>, sqlx::Error> {
        let timer = QueryTimer::new("list_ratings_for_event");
        let result = sqlx::query_as::<_, RatingEntity>(
            r#"
            SELECT id, event_id, user_id, score, comment, created_at, updated_at
            FROM ratings
            WHERE event_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_rating");
        let result = sqlx::query("DELETE FROM ratings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
