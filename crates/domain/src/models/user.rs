//! User account domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::allow_list::AllowListEntry;
use super::identity::Role;

/// A registered account. One per person who completed signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    #[serde(skip_serializing)] // Never serialize the secret hash to API responses
    pub secret_hash: String,
    pub role: Role,
    pub name: String,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub year_of_study: Option<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub external_id: String,
    pub email: String,
    pub secret_hash: String,
    pub role: Role,
    pub name: String,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub year_of_study: Option<i16>,
}

/// Public view of an account. Carries no secret material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_study: Option<i16>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            external_id: user.external_id,
            email: user.email,
            role: user.role,
            name: Some(user.name),
            department: user.department,
            phone: user.phone,
            year_of_study: user.year_of_study,
        }
    }
}

impl From<AllowListEntry> for UserProfile {
    fn from(entry: AllowListEntry) -> Self {
        Self {
            id: entry.id,
            external_id: entry.external_id,
            email: entry.email,
            role: entry.role,
            name: None,
            department: None,
            phone: None,
            year_of_study: None,
        }
    }
}

/// Request body for `POST /register`.
///
/// Required string fields default to empty so that a missing field reaches
/// the signup flow and is reported as invalid input rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub external_id: String,

    #[serde(default, alias = "password")]
    pub secret: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub role: Option<Role>,

    #[validate(length(max = 100, message = "Department must be at most 100 characters"))]
    pub department: Option<String>,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[validate(range(min = 1, max = 6, message = "Year of study must be between 1 and 6"))]
    pub year_of_study: Option<i16>,
}

/// Response body for `POST /register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// Request body for `POST /login`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub external_id: String,
    #[serde(default, alias = "password")]
    pub secret: String,
}

/// Response body for `POST /login`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub user: UserProfile,
}

/// Response body for `GET /api/users/lookup/:externalId`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLookupResponse {
    pub name: String,
    pub external_id: String,
    pub department: Option<String>,
}

impl From<User> for UserLookupResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            external_id: user.external_id,
            department: user.department,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            external_id: "SFA001".to_string(),
            email: "a@x.com".to_string(),
            secret_hash: "secret_hash_value".to_string(),
            role: Role::Student,
            name: "Asha".to_string(),
            department: Some("CSE".to_string()),
            phone: None,
            year_of_study: Some(2),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_secret_hash_not_serialized() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("secret_hash_value"));
        assert!(!json.contains("secretHash"));
    }

    #[test]
    fn test_profile_from_user_has_no_secret() {
        let profile: UserProfile = sample_user().into();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["externalId"], "SFA001");
        assert_eq!(json["role"], "student");
        assert!(json.get("secretHash").is_none());
        assert!(json.get("secret").is_none());
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_signup_request_password_alias() {
        let request: SignupRequest = serde_json::from_str(
            r#"{"externalId":"SFA001","password":"p@ss","name":"Asha","role":"student"}"#,
        )
        .unwrap();
        assert_eq!(request.secret, "p@ss");
        assert_eq!(request.role, Some(Role::Student));
    }

    #[test]
    fn test_signup_request_validation() {
        let mut request = SignupRequest {
            external_id: "SFA001".to_string(),
            secret: "p@ss".to_string(),
            name: "Asha".to_string(),
            email: Some("a@x.com".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_ok());

        request.email = Some("nope".to_string());
        assert!(request.validate().is_err());

        request.email = None;
        request.year_of_study = Some(9);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_lookup_response_from_user() {
        let lookup: UserLookupResponse = sample_user().into();
        assert_eq!(lookup.name, "Asha");
        assert_eq!(lookup.department.as_deref(), Some("CSE"));
    }
}
