//! Secret hashing and generation.
//!
//! Account secrets (user passwords and provisioned admin secrets) are stored
//! as Argon2id PHC strings. Verification reads the parameters back out of the
//! stored hash, so older hashes keep verifying after a parameter change.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use lazy_static::lazy_static;
use rand::{distributions::Alphanumeric, Rng};
use thiserror::Error;

/// Error type for secret operations.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Failed to hash secret: {0}")]
    HashError(String),

    #[error("Failed to verify secret: {0}")]
    VerifyError(String),

    #[error("Invalid secret hash format")]
    InvalidHashFormat,
}

// OWASP 2024 baseline for Argon2id: 19 MiB, 2 passes, 1 lane.
const MEMORY_COST: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

/// Length of secrets produced by [`generate_secret`].
pub const GENERATED_SECRET_LEN: usize = 24;

fn hasher() -> Result<Argon2<'static>, SecretError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| SecretError::HashError(format!("Invalid Argon2 params: {}", e)))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a secret with a fresh random salt, returning a PHC string.
///
/// ```
/// use shared::secret::hash_secret;
///
/// let hash = hash_secret("p@ss").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_secret(secret: &str) -> Result<String, SecretError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()?
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SecretError::HashError(e.to_string()))
}

/// Verifies a plaintext secret against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash itself is
/// unusable.
pub fn verify_secret(secret: &str, hash: &str) -> Result<bool, SecretError> {
    let parsed = PasswordHash::new(hash).map_err(|_| SecretError::InvalidHashFormat)?;

    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(SecretError::VerifyError(e.to_string())),
    }
}

lazy_static! {
    // Hash of a random secret, built with the same parameters as stored hashes.
    static ref PLACEHOLDER_HASH: String = hash_secret(&generate_secret()).unwrap_or_default();
}

/// Argon2id hash that no caller-supplied secret matches.
///
/// Verifying against it costs the same as verifying against a stored hash,
/// so lookups that find no hash can still spend the same time.
pub fn placeholder_hash() -> &'static str {
    PLACEHOLDER_HASH.as_str()
}

/// Generates a random alphanumeric secret for provisioned accounts.
pub fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LEN)
        .map(char::from)
        .collect()
}
