//! Identity resolution: decides whether an external ID is registered,
//! allowed to sign up, or unknown.

use std::sync::Arc;

use shared::identifiers::normalize_external_id;
use tracing::debug;

use super::error::AuthError;
use crate::models::{IdentityResolution, IdentityStatus, RoleTable};
use crate::stores::{CredentialStore, IdentityDirectory};

pub(crate) const EXTERNAL_ID_REQUIRED: &str = "External ID is required";
pub(crate) const INVALID_ID_FORMAT: &str = "Invalid ID format";

/// Normalizes an ID or fails with [`AuthError::InvalidInput`].
pub(crate) fn require_external_id(raw: &str) -> Result<String, AuthError> {
    normalize_external_id(raw)
        .ok_or_else(|| AuthError::InvalidInput(EXTERNAL_ID_REQUIRED.to_string()))
}

/// Resolves external IDs against the user store and the allow-lists.
#[derive(Clone)]
pub struct IdentityService {
    directory: Arc<dyn IdentityDirectory>,
    credentials: Arc<dyn CredentialStore>,
    roles: RoleTable,
}

impl IdentityService {
    pub fn new(
        directory: Arc<dyn IdentityDirectory>,
        credentials: Arc<dyn CredentialStore>,
        roles: RoleTable,
    ) -> Self {
        Self {
            directory,
            credentials,
            roles,
        }
    }

    /// Resolves a raw external ID.
    ///
    /// An existing account wins over whatever the allow-lists say. Otherwise
    /// the ID's prefix selects the allow-list to consult.
    pub async fn resolve(&self, raw_external_id: &str) -> Result<IdentityResolution, AuthError> {
        let external_id = require_external_id(raw_external_id)?;

        if let Some(user) = self.credentials.find_by_external_id(&external_id).await? {
            debug!(external_id = %external_id, "Identity already registered");
            return Ok(IdentityResolution {
                status: IdentityStatus::Registered,
                email: user.email,
                role: user.role,
            });
        }

        let role = self
            .roles
            .classify(&external_id)
            .ok_or_else(|| AuthError::InvalidInput(INVALID_ID_FORMAT.to_string()))?;

        match self.directory.find_entry(role, &external_id).await? {
            Some(entry) => Ok(IdentityResolution {
                status: IdentityStatus::Allowed,
                email: entry.email,
                role,
            }),
            None => Err(AuthError::NotFound(format!(
                "{} ID not found in records",
                role.label()
            ))),
        }
    }
}
