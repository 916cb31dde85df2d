//! Allow-list (identity directory) domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::identity::Role;

/// A pre-provisioned external ID permitted to sign up (or, for admins, log in).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowListEntry {
    pub id: Uuid,
    pub role: Role,
    pub external_id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub secret_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for adding an allow-list entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAllowListEntryRequest {
    #[validate(custom(function = "shared::validation::validate_external_id"))]
    pub external_id: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Request payload for changing an entry's email. The ID itself is immutable.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAllowListEntryRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}
