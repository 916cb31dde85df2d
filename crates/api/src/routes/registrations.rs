//! Event registration routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::registration::{
    CreateRegistrationRequest, ListRegistrationsQuery, UpdateRegistrationStatusRequest,
};
use domain::models::Registration;
use persistence::repositories::RegistrationRepository;
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::middleware::metrics::record_registration_created;
use crate::response::{DataResponse, ListResponse, MessageResponse};

fn registration_not_found() -> ApiError {
    ApiError::NotFound("Registration not found".to_string())
}

/// POST /api/registrations
///
/// A second registration for the same (event, user) is rejected with 400.
pub async fn create_registration(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateRegistrationRequest>,
) -> Result<(StatusCode, Json<DataResponse<Registration>>), ApiError> {
    let registration = state.registration_service().register(request).await?;
    record_registration_created(registration.participation_type.as_str());

    Ok((StatusCode::CREATED, Json(DataResponse::new(registration))))
}

/// GET /api/registrations?eventId=
pub async fn list_registrations(
    State(state): State<AppState>,
    Query(query): Query<ListRegistrationsQuery>,
) -> Result<Json<ListResponse<Registration>>, ApiError> {
    let registrations = RegistrationRepository::new(state.pool.clone())
        .list(query.event_id)
        .await?;
    Ok(Json(ListResponse::new(registrations)))
}

/// GET /api/registrations/user/:user_id
///
/// Includes team registrations that list the user on the roster.
pub async fn list_user_registrations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ListResponse<Registration>>, ApiError> {
    let registrations = state
        .registration_service()
        .registrations_for_user(user_id)
        .await?;
    Ok(Json(ListResponse::new(registrations)))
}

/// PUT /api/registrations/:id/status
pub async fn update_registration_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateRegistrationStatusRequest>,
) -> Result<Json<DataResponse<Registration>>, ApiError> {
    let registration = RegistrationRepository::new(state.pool.clone())
        .update_status(id, request.status)
        .await?
        .ok_or_else(registration_not_found)?;

    info!(
        registration_id = %registration.id,
        status = registration.status.as_str(),
        "Registration status updated"
    );

    Ok(Json(DataResponse::new(registration)))
}

/// DELETE /api/registrations/:id
pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !RegistrationRepository::new(state.pool.clone())
        .delete(id)
        .await?
    {
        return Err(registration_not_found());
    }

    info!(registration_id = %id, "Registration deleted");

    Ok(Json(MessageResponse::new("Registration deleted")))
}
