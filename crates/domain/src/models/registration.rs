//! Event registration domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a user takes part in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipationType {
    Individual,
    Team,
}

impl ParticipationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationType::Individual => "individual",
            ParticipationType::Team => "team",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "individual" => Some(ParticipationType::Individual),
            "team" => Some(ParticipationType::Team),
            _ => None,
        }
    }
}

/// Review state of a registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Rejected => "rejected",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RegistrationStatus::Pending),
            "approved" => Some(RegistrationStatus::Approved),
            "rejected" => Some(RegistrationStatus::Rejected),
            "cancelled" => Some(RegistrationStatus::Cancelled),
            _ => None,
        }
    }
}

/// One person on a team roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Roster attached to a team registration. Stored as a nested document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamData {
    pub team_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<TeamMember>,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl TeamData {
    /// Whether the leader or any member carries the given external ID.
    /// Comparison ignores case and surrounding whitespace.
    pub fn contains_member(&self, external_id: &str) -> bool {
        let wanted = external_id.trim();
        self.leader
            .iter()
            .chain(self.members.iter())
            .any(|member| member.external_id.trim().eq_ignore_ascii_case(wanted))
    }

    /// Uppercases every roster ID so stored rosters match normalized lookups.
    pub fn normalized(mut self) -> Self {
        if let Some(leader) = self.leader.as_mut() {
            leader.external_id = leader.external_id.trim().to_uppercase();
        }
        for member in &mut self.members {
            member.external_id = member.external_id.trim().to_uppercase();
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.leader.is_none() && self.members.is_empty()
    }
}

/// A user's sign-up for an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub participation_type: ParticipationType,
    pub team_data: Option<TeamData>,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a registration.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub participation_type: ParticipationType,
    pub team_data: Option<TeamData>,
    pub status: RegistrationStatus,
}

/// Request body for `POST /api/registrations`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub participation_type: ParticipationType,
    pub team_data: Option<TeamData>,
    pub status: Option<RegistrationStatus>,
}

/// Request body for `PUT /api/registrations/:id/status`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegistrationStatusRequest {
    pub status: RegistrationStatus,
}

/// Query parameters for listing registrations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRegistrationsQuery {
    pub event_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> TeamData {
        TeamData {
            team_name: "Byte Me".to_string(),
            department: Some("CSE".to_string()),
            leader: Some(TeamMember {
                external_id: "SFA001".to_string(),
                name: Some("Asha".to_string()),
                email: None,
            }),
            members: vec![TeamMember {
                external_id: "sfa002".to_string(),
                name: None,
                email: None,
            }],
        }
    }

    #[test]
    fn test_contains_member_checks_leader_and_members() {
        let team = roster();
        assert!(team.contains_member("SFA001"));
        assert!(team.contains_member("SFA002"));
        assert!(team.contains_member(" sfa002 "));
        assert!(!team.contains_member("SFA003"));
    }

    #[test]
    fn test_contains_member_is_not_substring_match() {
        assert!(!roster().contains_member("SFA00"));
    }

    #[test]
    fn test_normalized_uppercases_roster() {
        let team = roster().normalized();
        assert_eq!(team.members[0].external_id, "SFA002");
        assert_eq!(team.leader.unwrap().external_id, "SFA001");
    }

    #[test]
    fn test_team_data_deserialization_defaults() {
        let team: TeamData = serde_json::from_str(r#"{"teamName":"Solo Squad"}"#).unwrap();
        assert!(team.is_empty());
        assert!(team.members.is_empty());
    }

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(RegistrationStatus::default(), RegistrationStatus::Pending);
    }

    #[test]
    fn test_status_roundtrip_str() {
        for status in [
            RegistrationStatus::Pending,
            RegistrationStatus::Approved,
            RegistrationStatus::Rejected,
            RegistrationStatus::Cancelled,
        ] {
            assert_eq!(RegistrationStatus::from_str(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_create_registration_request_deserialization() {
        let json = r#"{
            "eventId": "550e8400-e29b-41d4-a716-446655440000",
            "userId": "550e8400-e29b-41d4-a716-446655440001",
            "participationType": "team",
            "teamData": {"teamName": "Byte Me", "members": [{"externalId": "SFA002"}]}
        }"#;
        let request: CreateRegistrationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.participation_type, ParticipationType::Team);
        assert!(request.status.is_none());
        assert!(request.team_data.unwrap().contains_member("SFA002"));
    }
}
