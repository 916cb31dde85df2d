//! Program catalog routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::program::{check_date_range, CreateProgramRequest, UpdateProgramRequest};
use domain::models::Program;
use persistence::repositories::ProgramRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::response::{DataResponse, ListResponse, MessageResponse};

fn program_not_found() -> ApiError {
    ApiError::NotFound("Program not found".to_string())
}

/// GET /api/programs
pub async fn list_programs(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Program>>, ApiError> {
    let programs = ProgramRepository::new(state.pool.clone()).list().await?;
    Ok(Json(ListResponse::new(programs)))
}

/// GET /api/programs/:id
pub async fn get_program(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<Program>>, ApiError> {
    let program = ProgramRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(program_not_found)?;
    Ok(Json(DataResponse::new(program)))
}

/// POST /api/programs
pub async fn create_program(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateProgramRequest>,
) -> Result<(StatusCode, Json<DataResponse<Program>>), ApiError> {
    request.validate()?;
    check_date_range(request.starts_on, request.ends_on).map_err(ApiError::Validation)?;

    let program = ProgramRepository::new(state.pool.clone())
        .create(&request)
        .await?;

    info!(program_id = %program.id, name = %program.name, "Program created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(program))))
}

/// PUT /api/programs/:id
///
/// Partial update. The date range is checked against the merged result.
pub async fn update_program(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateProgramRequest>,
) -> Result<Json<DataResponse<Program>>, ApiError> {
    request.validate()?;

    let repo = ProgramRepository::new(state.pool.clone());
    let existing = repo.find_by_id(id).await?.ok_or_else(program_not_found)?;
    check_date_range(
        request.starts_on.or(existing.starts_on),
        request.ends_on.or(existing.ends_on),
    )
    .map_err(ApiError::Validation)?;

    let program = repo
        .update(id, &request)
        .await?
        .ok_or_else(program_not_found)?;

    info!(program_id = %program.id, "Program updated");

    Ok(Json(DataResponse::new(program)))
}

/// DELETE /api/programs/:id
///
/// Events in the program are kept and lose their program link.
pub async fn delete_program(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !ProgramRepository::new(state.pool.clone()).delete(id).await? {
        return Err(program_not_found());
    }

    info!(program_id = %id, "Program deleted");

    Ok(Json(MessageResponse::new("Program deleted")))
}
