//! User account entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Role;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub secret_hash: String,
    pub role: String,
    pub name: String,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub year_of_study: Option<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            external_id: entity.external_id,
            email: entity.email,
            secret_hash: entity.secret_hash,
            // The CHECK constraint limits the column; fall back for safety.
            role: Role::from_str(&entity.role).unwrap_or(Role::Student),
            name: entity.name,
            department: entity.department,
            phone: entity.phone,
            year_of_study: entity.year_of_study,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(role: &str) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            external_id: "AED001".to_string(),
            email: "t@x.com".to_string(),
            secret_hash: "$argon2id$hash".to_string(),
            role: role.to_string(),
            name: "Ravi".to_string(),
            department: Some("ECE".to_string()),
            phone: None,
            year_of_study: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_entity_to_domain() {
        let user: domain::models::User = entity("teacher").into();
        assert_eq!(user.role, Role::Teacher);
        assert_eq!(user.external_id, "AED001");
        assert_eq!(user.secret_hash, "$argon2id$hash");
    }

    #[test]
    fn test_unknown_role_falls_back_to_student() {
        let user: domain::models::User = entity("janitor").into();
        assert_eq!(user.role, Role::Student);
    }
}
