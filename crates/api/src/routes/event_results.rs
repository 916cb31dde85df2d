//! Event result (placings) routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::event_result::CreateEventResultRequest;
use domain::models::EventResult;
use persistence::repositories::EventResultRepository;
use shared::identifiers::normalize_optional;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::response::{DataResponse, ListResponse, MessageResponse};

/// POST /api/event-results
///
/// A second result for the same position is rejected with 400.
pub async fn create_result(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEventResultRequest>,
) -> Result<(StatusCode, Json<DataResponse<EventResult>>), ApiError> {
    request.validate()?;
    let external_id = normalize_optional(request.external_id.as_deref());

    let result = EventResultRepository::new(state.pool.clone())
        .create(&request, external_id)
        .await?;

    info!(
        event_id = %result.event_id,
        position = result.position,
        "Event result recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(result))))
}

/// GET /api/event-results/event/:event_id
pub async fn list_event_results(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ListResponse<EventResult>>, ApiError> {
    let results = EventResultRepository::new(state.pool.clone())
        .list_for_event(event_id)
        .await?;
    Ok(Json(ListResponse::new(results)))
}

/// DELETE /api/event-results/:id
pub async fn delete_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !EventResultRepository::new(state.pool.clone())
        .delete(id)
        .await?
    {
        return Err(ApiError::NotFound("Event result not found".to_string()));
    }

    info!(result_id = %id, "Event result deleted");

    Ok(Json(MessageResponse::new("Event result deleted")))
}
