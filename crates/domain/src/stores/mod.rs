//! Storage ports used by the domain flows.
//!
//! The persistence crate implements these traits over PostgreSQL; the
//! [`memory`] module provides in-process implementations. The OTP store is
//! only ever in-process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    AllowListEntry, Event, NewRegistration, NewUser, OtpCheck, OtpEntry, Registration, Role, User,
};

pub mod memory;

/// Errors surfaced by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// A foreign key pointed at a row that does not exist.
    #[error("Missing referenced record: {0}")]
    MissingReference(String),

    #[error("Storage failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The three allow-lists (students, teachers, admins), keyed by normalized external ID.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    async fn find_entry(&self, role: Role, external_id: &str)
        -> StoreResult<Option<AllowListEntry>>;

    async fn list_entries(&self, role: Role) -> StoreResult<Vec<AllowListEntry>>;

    async fn create_entry(
        &self,
        role: Role,
        external_id: &str,
        email: &str,
    ) -> StoreResult<AllowListEntry>;

    /// Returns `None` when no entry exists for the ID.
    async fn update_email(
        &self,
        role: Role,
        external_id: &str,
        email: &str,
    ) -> StoreResult<Option<AllowListEntry>>;

    /// Inserts or replaces an admin entry together with its secret hash.
    async fn upsert_admin(
        &self,
        external_id: &str,
        email: &str,
        secret_hash: &str,
    ) -> StoreResult<AllowListEntry>;

    /// Returns whether an entry was removed.
    async fn delete_entry(&self, role: Role, external_id: &str) -> StoreResult<bool>;
}

/// Registered user accounts.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_external_id(&self, external_id: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn email_taken(&self, email: &str) -> StoreResult<bool>;

    async fn create_user(&self, new_user: NewUser) -> StoreResult<User>;
}

/// Read access to events for eligibility checks.
#[async_trait]
pub trait EventCatalog: Send + Sync {
    async fn find_event(&self, id: Uuid) -> StoreResult<Option<Event>>;
}

/// Registrations, as needed by the eligibility and lookup-by-user flows.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn find_for_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Registration>>;

    async fn create_registration(&self, new: NewRegistration) -> StoreResult<Registration>;

    async fn find_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Registration>>;

    /// Team registrations whose roster (leader or members) lists the external ID.
    async fn find_team_registrations_with_member(
        &self,
        external_id: &str,
    ) -> StoreResult<Vec<Registration>>;
}

/// Process-wide table of live one-time codes.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Stores a code, replacing any live code for the same ID.
    async fn put(&self, external_id: &str, entry: OtpEntry);

    /// Compares and, on match, removes the code in one step.
    async fn consume(&self, external_id: &str, code: &str, now: DateTime<Utc>) -> OtpCheck;

    /// Drops expired entries, returning how many were removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> usize;

    async fn live_count(&self) -> usize;
}
