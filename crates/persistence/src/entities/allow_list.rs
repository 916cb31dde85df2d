//! Allow-list entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{AllowListEntry, Role};
use sqlx::FromRow;
use uuid::Uuid;

/// Row of `allowed_students`, `allowed_teachers` or `allowed_admins`.
///
/// The role is not stored; it is implied by the table the row came from.
#[derive(Debug, Clone, FromRow)]
pub struct AllowListEntryEntity {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub secret_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AllowListEntryEntity {
    pub fn into_domain(self, role: Role) -> AllowListEntry {
        AllowListEntry {
            id: self.id,
            role,
            external_id: self.external_id,
            email: self.email,
            secret_hash: self.secret_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
