//! Announcement routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::notification::{CreateNotificationRequest, ListNotificationsQuery};
use domain::models::Notification;
use persistence::repositories::NotificationRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::response::{DataResponse, ListResponse, MessageResponse};

/// GET /api/notifications?audience=
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<ListResponse<Notification>>, ApiError> {
    let notifications = NotificationRepository::new(state.pool.clone())
        .list(query.audience)
        .await?;
    Ok(Json(ListResponse::new(notifications)))
}

/// POST /api/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<DataResponse<Notification>>), ApiError> {
    request.validate()?;

    let notification = NotificationRepository::new(state.pool.clone())
        .create(&request)
        .await?;

    info!(
        notification_id = %notification.id,
        audience = notification.audience.as_str(),
        "Notification created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(notification))))
}

/// DELETE /api/notifications/:id
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !NotificationRepository::new(state.pool.clone())
        .delete(id)
        .await?
    {
        return Err(ApiError::NotFound("Notification not found".to_string()));
    }

    info!(notification_id = %id, "Notification deleted");

    Ok(Json(MessageResponse::new("Notification deleted")))
}
