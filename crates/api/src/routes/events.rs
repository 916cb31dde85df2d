//! Event catalog routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::event::{
    check_event_shape, CreateEventRequest, ListEventsQuery, UpdateEventRequest,
};
use domain::models::Event;
use persistence::repositories::EventRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::response::{DataResponse, ListResponse, MessageResponse};

fn event_not_found() -> ApiError {
    ApiError::NotFound("Event not found".to_string())
}

/// GET /api/events?programId=
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let events = EventRepository::new(state.pool.clone())
        .list(query.program_id)
        .await?;
    Ok(Json(ListResponse::new(events)))
}

/// GET /api/events/:id
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<Event>>, ApiError> {
    let event = EventRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(event_not_found)?;
    Ok(Json(DataResponse::new(event)))
}

/// POST /api/events
///
/// An unknown `programId` surfaces as 404 through the foreign key.
pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<DataResponse<Event>>), ApiError> {
    request.validate()?;
    check_event_shape(
        request.starts_at,
        request.ends_at,
        request.min_team_size,
        request.max_team_size,
    )
    .map_err(ApiError::Validation)?;

    let event = EventRepository::new(state.pool.clone())
        .create(&request)
        .await?;

    info!(
        event_id = %event.id,
        title = %event.title,
        participation_mode = event.participation_mode.as_str(),
        "Event created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(event))))
}

/// PUT /api/events/:id
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateEventRequest>,
) -> Result<Json<DataResponse<Event>>, ApiError> {
    request.validate()?;

    let repo = EventRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(event_not_found)?;
    check_event_shape(
        request.starts_at.or(existing.starts_at),
        request.ends_at.or(existing.ends_at),
        request.min_team_size.or(existing.min_team_size),
        request.max_team_size.or(existing.max_team_size),
    )
    .map_err(ApiError::Validation)?;

    let event = repo
        .update(id, &request)
        .await?
        .ok_or_else(event_not_found)?;

    info!(event_id = %event.id, "Event updated");

    Ok(Json(DataResponse::new(event)))
}

/// DELETE /api/events/:id
///
/// Registrations, attendance, ratings and results go with the event.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !EventRepository::new(state.pool.clone()).delete(id).await? {
        return Err(event_not_found());
    }

    info!(event_id = %id, "Event deleted");

    Ok(Json(MessageResponse::new("Event deleted")))
}
