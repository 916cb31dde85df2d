//! Secret-based login for users and provisioned admins.

use std::sync::Arc;

use shared::identifiers::normalize_external_id;
use shared::secret::{placeholder_hash, verify_secret, SecretError};
use tracing::warn;

use super::error::AuthError;
use crate::models::{Role, RoleTable, UserProfile};
use crate::stores::{CredentialStore, IdentityDirectory};

/// Checks secrets against stored Argon2 hashes.
///
/// Every failure (unknown ID, admin without a provisioned secret, wrong
/// secret) surfaces as [`AuthError::InvalidCredentials`].
#[derive(Clone)]
pub struct LoginService {
    directory: Arc<dyn IdentityDirectory>,
    credentials: Arc<dyn CredentialStore>,
    roles: RoleTable,
}

impl LoginService {
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

    /// IDs carrying the admin prefix are checked against the admin
    /// allow-list's provisioned secret and skip the user store.
    pub async fn login(
        &self,
        raw_external_id: &str,
        secret: &str,
    ) -> Result<UserProfile, AuthError> {
        let external_id =
            normalize_external_id(raw_external_id).ok_or(AuthError::InvalidCredentials)?;
        if secret.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let account = if self.roles.classify(&external_id) == Some(Role::Admin) {
            self.directory
                .find_entry(Role::Admin, &external_id)
                .await?
                .map(|entry| {
                    let hash = entry.secret_hash.clone();
                    (UserProfile::from(entry), hash)
                })
        } else {
            self.credentials
                .find_by_external_id(&external_id)
                .await?
                .map(|user| {
                    let hash = Some(user.secret_hash.clone());
                    (UserProfile::from(user), hash)
                })
        };

        let (profile, stored_hash) = match account {
            Some((profile, hash)) => (Some(profile), hash),
            None => (None, None),
        };

        match check_secret(secret, stored_hash.as_deref(), verify_secret) {
            Ok(true) => profile.ok_or(AuthError::InvalidCredentials),
            Ok(false) => Err(AuthError::InvalidCredentials),
            Err(e) => {
                warn!(external_id = %external_id, error = %e, "Stored secret hash is unusable");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

/// Runs `verify` exactly once. Without a stored hash the secret is checked
/// against [`placeholder_hash`] and the outcome is always a mismatch.
fn check_secret<F>(
    secret: &str,
    stored_hash: Option<&str>,
    verify: F,
) -> Result<bool, SecretError>
where
    F: Fn(&str, &str) -> Result<bool, SecretError>,
{
    match stored_hash {
        Some(hash) => verify(secret, hash),
        None => {
            let _ = verify(secret, placeholder_hash());
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::stores::memory::{InMemoryCredentialStore, InMemoryDirectory};
    use shared::secret::hash_secret;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn service() -> LoginService {
        let directory = Arc::new(InMemoryDirectory::new());
        directory
            .upsert_admin("ADMIN001", "admin@x.com", &hash_secret("root-secret").unwrap())
            .await
            .unwrap();
        directory
            .create_entry(Role::Admin, "ADMIN002", "nosecret@x.com")
            .await
            .unwrap();

        let credentials = Arc::new(InMemoryCredentialStore::new());
        credentials
            .create_user(NewUser {
                external_id: "SFA001".to_string(),
                email: "a@x.com".to_string(),
                secret_hash: hash_secret("p@ss").unwrap(),
                role: Role::Student,
                name: "Asha".to_string(),
                department: Some("CSE".to_string()),
                phone: None,
                year_of_study: Some(2),
            })
            .await
            .unwrap();

        LoginService::new(directory, credentials, RoleTable::default())
    }

    #[tokio::test]
    async fn test_user_login_returns_profile() {
        let service = service().await;
        let profile = service.login("sfa001", "p@ss").await.unwrap();
        assert_eq!(profile.external_id, "SFA001");
        assert_eq!(profile.role, Role::Student);
        assert_eq!(profile.name.as_deref(), Some("Asha"));
    }

    #[tokio::test]
    async fn test_admin_login_uses_allow_list_hash() {
        let service = service().await;
        let profile = service.login("ADMIN001", "root-secret").await.unwrap();
        assert_eq!(profile.role, Role::Admin);
        assert_eq!(profile.email, "admin@x.com");
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let service = service().await;
        let cases = [
            ("SFA001", "wrong"),
            ("SFA404", "p@ss"),
            ("ADMIN001", "wrong"),
            ("ADMIN002", "anything"),
            ("", "p@ss"),
            ("SFA001", ""),
        ];
        for (id, secret) in cases {
            let err = service.login(id, secret).await.unwrap_err();
            assert!(
                matches!(err, AuthError::InvalidCredentials),
                "{id}/{secret}"
            );
            assert_eq!(err.to_string(), "Invalid credentials");
        }
    }

    #[test]
    fn test_check_secret_verifies_with_or_without_stored_hash() {
        let calls = AtomicUsize::new(0);
        let seen = std::sync::Mutex::new(Vec::new());
        let verify = |secret: &str, hash: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            seen.lock().unwrap().push(hash.to_string());
            verify_secret(secret, hash)
        };

        let stored = hash_secret("p@ss").unwrap();
        assert!(check_secret("p@ss", Some(stored.as_str()), &verify).unwrap());
        assert!(!check_secret("wrong", Some(stored.as_str()), &verify).unwrap());
        assert!(!check_secret("p@ss", None, &verify).unwrap());

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(seen.lock().unwrap()[2], placeholder_hash());
    }

    #[tokio::test]
    async fn test_unknown_id_pays_hash_cost() {
        let service = service().await;

        // Warm the placeholder so its one-off hashing is not timed.
        let _ = placeholder_hash();

        let started = std::time::Instant::now();
        let _ = service.login("SFA001", "wrong").await;
        let known = started.elapsed();

        let started = std::time::Instant::now();
        let _ = service.login("SFA404", "wrong").await;
        let unknown = started.elapsed();

        assert!(unknown * 4 >= known, "known={known:?} unknown={unknown:?}");
    }
}
