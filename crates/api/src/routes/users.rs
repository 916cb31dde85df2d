//! User lookup routes.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::user::UserLookupResponse;
use domain::models::UserProfile;
use shared::identifiers::normalize_external_id;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::response::DataResponse;

const USER_NOT_FOUND: &str = "User not found";

/// Public summary of a registered user, used to fill in team rosters.
///
/// GET /api/users/lookup/:externalId
pub async fn lookup_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserLookupResponse>, ApiError> {
    let external_id = normalize_external_id(&raw_id)
        .ok_or_else(|| ApiError::Validation("External ID is required".to_string()))?;

    let user = state
        .stores
        .credentials
        .find_by_external_id(&external_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))?;

    Ok(Json(user.into()))
}

/// GET /api/users/:userId
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<DataResponse<UserProfile>>, ApiError> {
    let user = state
        .stores
        .credentials
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))?;

    Ok(Json(DataResponse::new(user.into())))
}
