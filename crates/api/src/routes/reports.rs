use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::report::{CreateReportRequest, UpdateReportRequest};
use domain::models::Report;
use persistence::repositories::ReportRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::response::{DataResponse, ListResponse, MessageResponse};

fn report_not_found() -> ApiError {
    ApiError::NotFound("Report not found".to_string())
}

/// GET /api/reports
pub async fn list_reports(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Report>>, ApiError> {
    let reports = ReportRepository::new(state.pool.clone()).list().await?;
    Ok(Json(ListResponse::new(reports)))
}

/// GET /api/reports/:id
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<Report>>, ApiError> {
    let report = ReportRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(report_not_found)?;
    Ok(Json(DataResponse::new(report)))
}

/// POST /api/reports
pub async fn create_report(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateReportRequest>,
) -> Result<(StatusCode, Json<DataResponse<Report>>), ApiError> {
    request.validate()?;

    let report = ReportRepository::new(state.pool.clone())
        .create(&request)
        .await?;

    info!(report_id = %report.id, "Report created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(report))))
}

/// PUT /api/reports/:id
pub async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateReportRequest>,
) -> Result<Json<DataResponse<Report>>, ApiError> {
    request.validate()?;

    let report = ReportRepository::new(state.pool.clone())
        .update(id, &request)
        .await?
        .ok_or_else(report_not_found)?;

    info!(report_id = %report.id, "Report updated");

    Ok(Json(DataResponse::new(report)))
}

/// DELETE /api/reports/:id
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !ReportRepository::new(state.pool.clone()).delete(id).await? {
        return Err(report_not_found());
    }

    info!(report_id = %id, "Report deleted");

    Ok(Json(MessageResponse::new("Report deleted")))
}
