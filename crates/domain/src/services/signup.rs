//! Account signup for allow-listed students and teachers.

use std::sync::Arc;

use shared::secret::hash_secret;
use tracing::info;

use super::error::AuthError;
use super::identity::{require_external_id, INVALID_ID_FORMAT};
use crate::models::user::SignupRequest;
use crate::models::{NewUser, RoleTable, User};
use crate::stores::{CredentialStore, IdentityDirectory};

const ALREADY_REGISTERED: &str = "User already registered";

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Creates user accounts once an ID is confirmed on its allow-list.
#[derive(Clone)]
pub struct SignupService {
    directory: Arc<dyn IdentityDirectory>,
    credentials: Arc<dyn CredentialStore>,
    roles: RoleTable,
}

impl SignupService {
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

    /// Registers a new account.
    ///
    /// The email falls back to the allow-list email when the request has
    /// none. A unique-constraint violation from the store is reported as a
    /// conflict, same as the up-front duplicate check.
    pub async fn sign_up(&self, request: SignupRequest) -> Result<User, AuthError> {
        let external_id = require_external_id(&request.external_id)?;
        if request.secret.is_empty() {
            return Err(AuthError::InvalidInput("Secret is required".to_string()));
        }
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AuthError::InvalidInput("Name is required".to_string()));
        }

        let role = self
            .roles
            .classify(&external_id)
            .ok_or_else(|| AuthError::InvalidInput(INVALID_ID_FORMAT.to_string()))?;
        if !role.can_sign_up() {
            return Err(AuthError::InvalidInput(
                "Admin accounts are provisioned, not registered".to_string(),
            ));
        }
        if let Some(claimed) = request.role {
            if claimed != role {
                return Err(AuthError::InvalidInput(format!(
                    "ID {} does not belong to a {}",
                    external_id,
                    claimed.as_str()
                )));
            }
        }

        let entry = self
            .directory
            .find_entry(role, &external_id)
            .await?
            .ok_or_else(|| AuthError::NotFound(format!("{} ID not found in records", role.label())))?;

        let email = trimmed(request.email).unwrap_or(entry.email);

        if self
            .credentials
            .find_by_external_id(&external_id)
            .await?
            .is_some()
            || self.credentials.email_taken(&email).await?
        {
            return Err(AuthError::Conflict(ALREADY_REGISTERED.to_string()));
        }

        let secret_hash = hash_secret(&request.secret)?;

        let user = self
            .credentials
            .create_user(NewUser {
                external_id,
                email,
                secret_hash,
                role,
                name: name.to_string(),
                department: trimmed(request.department),
                phone: trimmed(request.phone),
                year_of_study: request.year_of_study,
            })
            .await?;

        info!(
            user_id = %user.id,
            external_id = %user.external_id,
            role = %user.role,
            "User signed up"
        );

        Ok(user)
    }
}
