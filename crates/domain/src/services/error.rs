//! Error types for the identity and registration flows.

use shared::secret::SecretError;
use thiserror::Error;

use crate::stores::StoreError;

/// Failures of identity resolution, OTP, signup and login.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    /// Login failure. Deliberately carries no detail.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => AuthError::Conflict("User already registered".to_string()),
            other => AuthError::Store(other),
        }
    }
}

/// Failures of the registration eligibility flow.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Event not found")]
    EventNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("User already registered for this event")]
    AlreadyRegistered,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for RegistrationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => RegistrationError::AlreadyRegistered,
            other => RegistrationError::Store(other),
        }
    }
}
