//! In-process store implementations.
//!
//! [`InMemoryOtpStore`] is the production OTP table. The others back unit
//! and router tests and enforce the same uniqueness rules as the database
//! schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    CredentialStore, EventCatalog, IdentityDirectory, OtpStore, RegistrationStore, StoreError,
    StoreResult,
};
use crate::models::{
    AllowListEntry, Event, NewRegistration, NewUser, OtpCheck, OtpEntry, ParticipationType,
    Registration, Role, User,
};

/// Live OTP codes keyed by normalized external ID.
#[derive(Debug, Default)]
pub struct InMemoryOtpStore {
    entries: RwLock<HashMap<String, OtpEntry>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, external_id: &str, entry: OtpEntry) {
        self.entries
            .write()
            .await
            .insert(external_id.to_string(), entry);
    }

    async fn consume(&self, external_id: &str, code: &str, now: DateTime<Utc>) -> OtpCheck {
        let mut entries = self.entries.write().await;
        match entries.get(external_id) {
            None => OtpCheck::Missing,
            Some(entry) if entry.is_expired(now) => {
                entries.remove(external_id);
                OtpCheck::Missing
            }
            Some(entry) if entry.code == code => {
                entries.remove(external_id);
                OtpCheck::Matched
            }
            Some(_) => OtpCheck::Mismatch,
        }
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    async fn live_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// Allow-lists held in a map keyed by (role, external ID).
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    entries: RwLock<HashMap<(Role, String), AllowListEntry>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryDirectory {
    async fn find_entry(
        &self,
        role: Role,
        external_id: &str,
    ) -> StoreResult<Option<AllowListEntry>> {
        Ok(self
            .entries
            .read()
            .await
            .get(&(role, external_id.to_string()))
            .cloned())
    }

    async fn list_entries(&self, role: Role) -> StoreResult<Vec<AllowListEntry>> {
        let mut entries: Vec<AllowListEntry> = self
            .entries
            .read()
            .await
            .values()
            .filter(|e| e.role == role)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.external_id.cmp(&b.external_id));
        Ok(entries)
    }

    async fn create_entry(
        &self,
        role: Role,
        external_id: &str,
        email: &str,
    ) -> StoreResult<AllowListEntry> {
        let mut entries = self.entries.write().await;
        let key = (role, external_id.to_string());
        if entries.contains_key(&key) {
            return Err(StoreError::Duplicate(format!(
                "{} ID {} already listed",
                role.label(),
                external_id
            )));
        }
        let now = Utc::now();
        let entry = AllowListEntry {
            id: Uuid::new_v4(),
            role,
            external_id: external_id.to_string(),
            email: email.to_string(),
            secret_hash: None,
            created_at: now,
            updated_at: now,
        };
        entries.insert(key, entry.clone());
        Ok(entry)
    }

    async fn update_email(
        &self,
        role: Role,
        external_id: &str,
        email: &str,
    ) -> StoreResult<Option<AllowListEntry>> {
        let mut entries = self.entries.write().await;
        Ok(entries
            .get_mut(&(role, external_id.to_string()))
            .map(|entry| {
                entry.email = email.to_string();
                entry.updated_at = Utc::now();
                entry.clone()
            }))
    }

    async fn upsert_admin(
        &self,
        external_id: &str,
        email: &str,
        secret_hash: &str,
    ) -> StoreResult<AllowListEntry> {
        let mut entries = self.entries.write().await;
        let now = Utc::now();
        let entry = entries
            .entry((Role::Admin, external_id.to_string()))
            .or_insert_with(|| AllowListEntry {
                id: Uuid::new_v4(),
                role: Role::Admin,
                external_id: external_id.to_string(),
                email: email.to_string(),
                secret_hash: None,
                created_at: now,
                updated_at: now,
            });
        entry.email = email.to_string();
        entry.secret_hash = Some(secret_hash.to_string());
        entry.updated_at = now;
        Ok(entry.clone())
    }

    async fn delete_entry(&self, role: Role, external_id: &str) -> StoreResult<bool> {
        Ok(self
            .entries
            .write()
            .await
            .remove(&(role, external_id.to_string()))
            .is_some())
    }
}

/// User accounts with unique external ID and email.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_external_id(&self, external_id: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.external_id == external_id)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn email_taken(&self, email: &str) -> StoreResult<bool> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| {
            u.external_id == new_user.external_id || u.email.eq_ignore_ascii_case(&new_user.email)
        }) {
            return Err(StoreError::Duplicate("users_external_id_or_email".to_string()));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            external_id: new_user.external_id,
            email: new_user.email,
            secret_hash: new_user.secret_hash,
            role: new_user.role,
            name: new_user.name,
            department: new_user.department,
            phone: new_user.phone,
            year_of_study: new_user.year_of_study,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Events keyed by ID. Populated directly with [`InMemoryEventCatalog::insert`].
#[derive(Debug, Default)]
pub struct InMemoryEventCatalog {
    events: RwLock<HashMap<Uuid, Event>>,
}

impl InMemoryEventCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, event: Event) {
        self.events.write().await.insert(event.id, event);
    }
}

#[async_trait]
impl EventCatalog for InMemoryEventCatalog {
    async fn find_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        Ok(self.events.read().await.get(&id).cloned())
    }
}

/// Registrations with a unique (event, user) pair.
#[derive(Debug, Default)]
pub struct InMemoryRegistrationStore {
    registrations: RwLock<Vec<Registration>>,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn find_for_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<Registration>> {
        Ok(self
            .registrations
            .read()
            .await
            .iter()
            .find(|r| r.event_id == event_id && r.user_id == user_id)
            .cloned())
    }

    async fn create_registration(&self, new: NewRegistration) -> StoreResult<Registration> {
        let mut registrations = self.registrations.write().await;
        if registrations
            .iter()
            .any(|r| r.event_id == new.event_id && r.user_id == new.user_id)
        {
            return Err(StoreError::Duplicate("registrations_event_user".to_string()));
        }
        let now = Utc::now();
        let registration = Registration {
            id: Uuid::new_v4(),
            event_id: new.event_id,
            user_id: new.user_id,
            participation_type: new.participation_type,
            team_data: new.team_data,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        registrations.push(registration.clone());
        Ok(registration)
    }

    async fn find_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Registration>> {
        Ok(self
            .registrations
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_team_registrations_with_member(
        &self,
        external_id: &str,
    ) -> StoreResult<Vec<Registration>> {
        Ok(self
            .registrations
            .read()
            .await
            .iter()
            .filter(|r| r.participation_type == ParticipationType::Team)
            .filter(|r| {
                r.team_data
                    .as_ref()
                    .is_some_and(|team| team.contains_member(external_id))
            })
            .cloned()
            .collect())
    }
}
