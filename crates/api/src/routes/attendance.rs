//! Attendance routes.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::attendance::MarkAttendanceRequest;
use domain::models::Attendance;
use persistence::repositories::AttendanceRepository;
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::response::{DataResponse, ListResponse};

/// POST /api/attendance
///
/// Marking the same user twice overwrites the earlier status.
pub async fn mark_attendance(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<MarkAttendanceRequest>,
) -> Result<Json<DataResponse<Attendance>>, ApiError> {
    let attendance = AttendanceRepository::new(state.pool.clone())
        .mark(request.event_id, request.user_id, request.status)
        .await?;

    info!(
        event_id = %attendance.event_id,
        user_id = %attendance.user_id,
        status = attendance.status.as_str(),
        "Attendance marked"
    );

    Ok(Json(DataResponse::new(attendance)))
}

/// GET /api/attendance/event/:event_id
pub async fn list_event_attendance(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<ListResponse<Attendance>>, ApiError> {
    let marks = AttendanceRepository::new(state.pool.clone())
        .list_for_event(event_id)
        .await?;
    Ok(Json(ListResponse::new(marks)))
}

/// GET /api/attendance/user/:user_id
pub async fn list_user_attendance(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ListResponse<Attendance>>, ApiError> {
    let marks = AttendanceRepository::new(state.pool.clone())
        .list_for_user(user_id)
        .await?;
    Ok(Json(ListResponse::new(marks)))
}
