//! Identity domain models: roles, the role-prefix table and verify-ID payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role claimed by an external ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }

    /// Capitalized name used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Admin => "Admin",
        }
    }

    /// Parses the plural collection name used in allow-list routes.
    pub fn from_list_name(name: &str) -> Option<Self> {
        match name {
            "students" => Some(Role::Student),
            "teachers" => Some(Role::Teacher),
            "admins" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Whether accounts with this role are created through signup.
    pub fn can_sign_up(&self) -> bool {
        !matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the role-prefix table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePrefix {
    pub prefix: String,
    pub role: Role,
}

impl RolePrefix {
    pub fn new(prefix: impl Into<String>, role: Role) -> Self {
        Self {
            prefix: prefix.into(),
            role,
        }
    }
}

/// Errors raised when building a [`RoleTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleTableError {
    #[error("Role prefix table is empty")]
    Empty,

    #[error("Role prefix for {0} is blank")]
    BlankPrefix(Role),

    #[error("Role prefix {0:?} must be uppercase")]
    NotUppercase(String),

    #[error("Role prefixes {0:?} and {1:?} overlap")]
    Overlap(String, String),
}

/// Default prefix table: student, then teacher, then admin.
pub fn default_role_prefixes() -> Vec<RolePrefix> {
    vec![
        RolePrefix::new("SFA", Role::Student),
        RolePrefix::new("AED", Role::Teacher),
        RolePrefix::new("ADMIN", Role::Admin),
    ]
}

/// Ordered mapping from ID prefix to role.
///
/// Construction rejects tables where one prefix is a prefix of another, so
/// at most one row can ever match a given ID and the evaluation order never
/// changes the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTable {
    entries: Vec<RolePrefix>,
}

impl RoleTable {
    pub fn new(entries: Vec<RolePrefix>) -> Result<Self, RoleTableError> {
        if entries.is_empty() {
            return Err(RoleTableError::Empty);
        }

        for entry in &entries {
            if entry.prefix.trim().is_empty() {
                return Err(RoleTableError::BlankPrefix(entry.role));
            }
            if entry.prefix != entry.prefix.to_uppercase() {
                return Err(RoleTableError::NotUppercase(entry.prefix.clone()));
            }
        }

        for (i, a) in entries.iter().enumerate() {
            for b in entries.iter().skip(i + 1) {
                if a.prefix.starts_with(&b.prefix) || b.prefix.starts_with(&a.prefix) {
                    return Err(RoleTableError::Overlap(a.prefix.clone(), b.prefix.clone()));
                }
            }
        }

        Ok(Self { entries })
    }

    /// Classifies a normalized (uppercase) external ID.
    pub fn classify(&self, external_id: &str) -> Option<Role> {
        self.entries
            .iter()
            .find(|entry| external_id.starts_with(&entry.prefix))
            .map(|entry| entry.role)
    }

    pub fn entries(&self) -> &[RolePrefix] {
        &self.entries
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self {
            entries: default_role_prefixes(),
        }
    }
}

/// Outcome of identity resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityStatus {
    /// A user account already exists for the ID.
    Registered,
    /// The ID is on an allow-list but has not signed up yet.
    Allowed,
}

/// Result of `POST /verify-id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResolution {
    pub status: IdentityStatus,
    pub email: String,
    pub role: Role,
}

/// Request body for `POST /verify-id` and `POST /send-otp`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIdRequest {
    #[serde(default)]
    pub external_id: String,
}

/// Request body for `POST /verify-otp`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub external_id: String,
    #[serde(default, alias = "otp")]
    pub code: String,
}

/// Response body for `POST /send-otp`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub expires_in_secs: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!(Role::from_str("student").unwrap(), Role::Student);
        assert_eq!(Role::from_str("TEACHER").unwrap(), Role::Teacher);
        assert_eq!(Role::from_str("Admin").unwrap(), Role::Admin);
        assert!(Role::from_str("guest").is_err());
    }

    #[test]
    fn test_role_from_list_name() {
        assert_eq!(Role::from_list_name("students"), Some(Role::Student));
        assert_eq!(Role::from_list_name("admins"), Some(Role::Admin));
        assert_eq!(Role::from_list_name("student"), None);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"teacher\"");
    }

    #[test]
    fn test_default_table_classifies_in_order() {
        let table = RoleTable::default();
        assert_eq!(table.classify("SFA001"), Some(Role::Student));
        assert_eq!(table.classify("AED042"), Some(Role::Teacher));
        assert_eq!(table.classify("ADMIN001"), Some(Role::Admin));
        assert_eq!(table.classify("XYZ001"), None);
    }

    #[test]
    fn test_classification_is_case_sensitive() {
        let table = RoleTable::default();
        assert_eq!(table.classify("sfa001"), None);
    }

    #[test]
    fn test_default_prefixes_do_not_overlap() {
        assert!(RoleTable::new(default_role_prefixes()).is_ok());
    }

    #[test]
    fn test_overlapping_prefixes_rejected() {
        let result = RoleTable::new(vec![
            RolePrefix::new("AD", Role::Teacher),
            RolePrefix::new("ADMIN", Role::Admin),
        ]);
        assert_eq!(
            result,
            Err(RoleTableError::Overlap("AD".to_string(), "ADMIN".to_string()))
        );
    }

    #[test]
    fn test_blank_and_lowercase_prefixes_rejected() {
        assert_eq!(
            RoleTable::new(vec![RolePrefix::new(" ", Role::Student)]),
            Err(RoleTableError::BlankPrefix(Role::Student))
        );
        assert_eq!(
            RoleTable::new(vec![RolePrefix::new("sfa", Role::Student)]),
            Err(RoleTableError::NotUppercase("sfa".to_string()))
        );
        assert_eq!(RoleTable::new(vec![]), Err(RoleTableError::Empty));
    }

    #[test]
    fn test_identity_resolution_serialization() {
        let resolution = IdentityResolution {
            status: IdentityStatus::Allowed,
            email: "a@x.com".to_string(),
            role: Role::Student,
        };
        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["status"], "allowed");
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["role"], "student");
    }

    #[test]
    fn test_verify_otp_request_accepts_otp_alias() {
        let request: VerifyOtpRequest =
            serde_json::from_str(r#"{"externalId":"SFA001","otp":"123456"}"#).unwrap();
        assert_eq!(request.code, "123456");
    }

    #[test]
    fn test_missing_external_id_defaults_to_empty() {
        let request: ExternalIdRequest = serde_json::from_str("{}").unwrap();
        assert!(request.external_id.is_empty());
    }
}
