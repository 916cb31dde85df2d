//! Event rating routes.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::rating::{EventRatings, SubmitRatingRequest};
use domain::models::Rating;
use persistence::repositories::RatingRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::response::{DataResponse, MessageResponse};

/// POST /api/ratings
///
/// One rating per user per event; resubmitting replaces it.
pub async fn submit_rating(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmitRatingRequest>,
) -> Result<Json<DataResponse<Rating>>, ApiError> {
    request.validate()?;

    let rating = RatingRepository::new(state.pool.clone())
        .upsert(&request)
        .await?;

    info!(
        event_id = %rating.event_id,
        user_id = %rating.user_id,
        score = rating.score,
        "Rating submitted"
    );

    Ok(Json(DataResponse::new(rating)))
}

/// GET /api/ratings/event/:event_id
pub async fn list_event_ratings(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventRatings>, ApiError> {
    let ratings = RatingRepository::new(state.pool.clone())
        .list_for_event(event_id)
        .await?;
    Ok(Json(EventRatings::new(ratings)))
}

/// DELETE /api/ratings/:id
pub async fn delete_rating(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !RatingRepository::new(state.pool.clone()).delete(id).await? {
        return Err(ApiError::NotFound("Rating not found".to_string()));
    }

    info!(rating_id = %id, "Rating deleted");

    Ok(Json(MessageResponse::new("Rating deleted")))
}
