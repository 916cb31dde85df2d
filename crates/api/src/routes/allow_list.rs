//! Allow-list administration: the student, teacher and admin directories.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::allow_list::{CreateAllowListEntryRequest, UpdateAllowListEntryRequest};
use domain::models::{AllowListEntry, Role};
use domain::stores::StoreError;
use shared::identifiers::normalize_external_id;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::response::{DataResponse, ListResponse, MessageResponse};

fn parse_role(list: &str) -> Result<Role, ApiError> {
    Role::from_list_name(list).ok_or_else(|| {
        ApiError::Validation(format!(
            "Unknown allow-list '{}', expected students, teachers or admins",
            list
        ))
    })
}

fn parse_external_id(raw: &str) -> Result<String, ApiError> {
    normalize_external_id(raw)
        .ok_or_else(|| ApiError::Validation("External ID is required".to_string()))
}

/// GET /api/allow-list/:role
pub async fn list_entries(
    State(state): State<AppState>,
    Path(list): Path<String>,
) -> Result<Json<ListResponse<AllowListEntry>>, ApiError> {
    let role = parse_role(&list)?;
    let entries = state.stores.directory.list_entries(role).await?;
    Ok(Json(ListResponse::new(entries)))
}

/// POST /api/allow-list/:role
///
/// Admin entries created here have no secret; run `provision-admin` to set one.
pub async fn create_entry(
    State(state): State<AppState>,
    Path(list): Path<String>,
    ApiJson(request): ApiJson<CreateAllowListEntryRequest>,
) -> Result<(StatusCode, Json<DataResponse<AllowListEntry>>), ApiError> {
    let role = parse_role(&list)?;
    request.validate()?;
    let external_id = parse_external_id(&request.external_id)?;

    if state.roles.classify(&external_id) != Some(role) {
        return Err(ApiError::Validation(format!(
            "ID {} does not match the {} ID format",
            external_id,
            role.as_str()
        )));
    }

    let entry = state
        .stores
        .directory
        .create_entry(role, &external_id, request.email.trim())
        .await
        .map_err(|e| match e {
            StoreError::Duplicate(_) => {
                ApiError::Conflict(format!("{} is already on the {} list", external_id, list))
            }
            other => other.into(),
        })?;

    info!(external_id = %entry.external_id, role = role.as_str(), "Allow-list entry created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(entry))))
}

/// PUT /api/allow-list/:role/:external_id
///
/// Only the email can change.
pub async fn update_entry(
    State(state): State<AppState>,
    Path((list, raw_id)): Path<(String, String)>,
    ApiJson(request): ApiJson<UpdateAllowListEntryRequest>,
) -> Result<Json<DataResponse<AllowListEntry>>, ApiError> {
    let role = parse_role(&list)?;
    let external_id = parse_external_id(&raw_id)?;
    request.validate()?;

    let entry = state
        .stores
        .directory
        .update_email(role, &external_id, request.email.trim())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} ID not found in records", role.label())))?;

    info!(external_id = %entry.external_id, role = role.as_str(), "Allow-list email updated");

    Ok(Json(DataResponse::new(entry)))
}

/// DELETE /api/allow-list/:role/:external_id
pub async fn delete_entry(
    State(state): State<AppState>,
    Path((list, raw_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let role = parse_role(&list)?;
    let external_id = parse_external_id(&raw_id)?;

    if !state
        .stores
        .directory
        .delete_entry(role, &external_id)
        .await?
    {
        return Err(ApiError::NotFound(format!(
            "{} ID not found in records",
            role.label()
        )));
    }

    info!(external_id = %external_id, role = role.as_str(), "Allow-list entry deleted");

    Ok(Json(MessageResponse::new("Allow-list entry deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("students").unwrap(), Role::Student);
        assert_eq!(parse_role("admins").unwrap(), Role::Admin);
        assert!(matches!(parse_role("staff"), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_parse_external_id_normalizes() {
        assert_eq!(parse_external_id(" sfa001 ").unwrap(), "SFA001");
        assert!(parse_external_id("  ").is_err());
    }
}
