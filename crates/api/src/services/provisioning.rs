//! Admin provisioning.
//!
//! Admins never sign up. An operator runs `campus-events provision-admin`,
//! which upserts the admin allow-list entry with a freshly generated secret
//! and prints that secret once.

use domain::models::{Role, RoleTable};
use domain::stores::{IdentityDirectory, StoreError};
use shared::identifiers::normalize_external_id;
use shared::secret::{generate_secret, hash_secret, SecretError};
use shared::validation::validate_external_id;
use tracing::info;
use validator::ValidateEmail;

/// Error types for admin provisioning.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("Invalid admin ID: {0}")]
    InvalidId(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Secret hashing error: {0}")]
    Secret(#[from] SecretError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Credentials of a freshly provisioned admin.
#[derive(Debug, Clone)]
pub struct ProvisionedAdmin {
    pub external_id: String,
    pub secret: String,
}

/// Creates or resets an admin. Running it twice rotates the secret.
pub async fn provision_admin(
    directory: &dyn IdentityDirectory,
    roles: &RoleTable,
    raw_external_id: &str,
    email: &str,
) -> Result<ProvisionedAdmin, ProvisionError> {
    validate_external_id(raw_external_id)
        .map_err(|_| ProvisionError::InvalidId(raw_external_id.trim().to_string()))?;
    let external_id = normalize_external_id(raw_external_id)
        .ok_or_else(|| ProvisionError::InvalidId(raw_external_id.to_string()))?;

    if roles.classify(&external_id) != Some(Role::Admin) {
        return Err(ProvisionError::InvalidId(format!(
            "{} does not carry an admin prefix",
            external_id
        )));
    }

    let email = email.trim();
    if !email.validate_email() {
        return Err(ProvisionError::InvalidEmail(email.to_string()));
    }

    let secret = generate_secret();
    let secret_hash = hash_secret(&secret)?;
    let entry = directory
        .upsert_admin(&external_id, email, &secret_hash)
        .await?;

    info!(external_id = %entry.external_id, "Admin provisioned");

    Ok(ProvisionedAdmin {
        external_id: entry.external_id,
        secret,
    })
}
