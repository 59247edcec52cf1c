//! User account data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access level assigned by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Moderator,
    Admin,
}

impl Role {
    /// Whether this role may act on pending submissions.
    pub fn can_moderate(self) -> bool {
        matches!(self, Self::Moderator | Self::Admin)
    }
}

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Account email
    pub email: String,

    /// Access level
    #[serde(default)]
    pub role: Role,

    /// Avatar image URL, if one is set
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Account creation time
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_moderation_rights() {
        assert!(!Role::Student.can_moderate());
        assert!(Role::Moderator.can_moderate());
        assert!(Role::Admin.can_moderate());
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"{
            "id": "u1",
            "name": "Alice",
            "email": "alice@example.edu",
            "created_at": "2026-01-15T09:30:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Student);
        assert!(user.avatar_url.is_none());
    }
}
