//! Registration eligibility and lookup by user.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::error::RegistrationError;
use crate::models::registration::CreateRegistrationRequest;
use crate::models::{NewRegistration, ParticipationType, Registration};
use crate::stores::{CredentialStore, EventCatalog, RegistrationStore};

/// Decides whether a user may register for an event, then records it.
#[derive(Clone)]
pub struct RegistrationService {
    registrations: Arc<dyn RegistrationStore>,
    events: Arc<dyn EventCatalog>,
    credentials: Arc<dyn CredentialStore>,
}

impl RegistrationService {
    pub fn new(
        registrations: Arc<dyn RegistrationStore>,
        events: Arc<dyn EventCatalog>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            registrations,
            events,
            credentials,
        }
    }

    /// Registers a user for an event.
    ///
    /// Declared event limits (per department, team sizes) are not checked.
    pub async fn register(
        &self,
        request: CreateRegistrationRequest,
    ) -> Result<Registration, RegistrationError> {
        let event = self
            .events
            .find_event(request.event_id)
            .await?
            .ok_or(RegistrationError::EventNotFound)?;

        if !event.participation_mode.accepts(request.participation_type) {
            return Err(RegistrationError::InvalidInput(format!(
                "Event accepts {} participation only",
                event.participation_mode.as_str()
            )));
        }

        let team_data = match request.participation_type {
            ParticipationType::Individual => None,
            ParticipationType::Team => match request.team_data {
                Some(team) if !team.is_empty() => Some(team.normalized()),
                _ => {
                    return Err(RegistrationError::InvalidInput(
                        "Team registration requires team data with at least one member"
                            .to_string(),
                    ))
                }
            },
        };

        if self.credentials.find_by_id(request.user_id).await?.is_none() {
            return Err(RegistrationError::UserNotFound);
        }

        if self
            .registrations
            .find_for_event_and_user(request.event_id, request.user_id)
            .await?
            .is_some()
        {
            return Err(RegistrationError::AlreadyRegistered);
        }

        let registration = self
            .registrations
            .create_registration(NewRegistration {
                event_id: request.event_id,
                user_id: request.user_id,
                participation_type: request.participation_type,
                team_data,
                status: request.status.unwrap_or_default(),
            })
            .await?;

        info!(
            registration_id = %registration.id,
            event_id = %registration.event_id,
            user_id = %registration.user_id,
            participation_type = registration.participation_type.as_str(),
            "Registration created"
        );

        Ok(registration)
    }

    /// Registrations a user appears in, directly or on a team roster.
    ///
    /// Deduplicated by registration ID, newest first.
    pub async fn registrations_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Registration>, RegistrationError> {
        let user = self
            .credentials
            .find_by_id(user_id)
            .await?
            .ok_or(RegistrationError::UserNotFound)?;

        let direct = self.registrations.find_by_user(user_id).await?;
        let via_team = self
            .registrations
            .find_team_registrations_with_member(&user.external_id)
            .await?;

        let mut seen = HashSet::new();
        let mut merged: Vec<Registration> = direct
            .into_iter()
            .chain(via_team)
            .filter(|r| seen.insert(r.id))
            .collect();
        merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(merged)
    }
}
