//! User model.
//!
//! Users are owned by the external identity resolver; the engine only reads
//! them to attribute attendance entries, leave requests and decisions.

use serde::{Deserialize, Serialize};

/// Stable identifier of a user (the employee number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Creates a user id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user as resolved by the identity resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// The user's line manager, if any.
    #[serde(default)]
    pub manager_id: Option<UserId>,
    /// Department name, if any.
    #[serde(default)]
    pub department: Option<String>,
}

impl User {
    /// Creates a user without a manager or department.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            name: name.into(),
            manager_id: None,
            department: None,
        }
    }

    /// Sets the user's line manager.
    pub fn reporting_to(mut self, manager: &UserId) -> Self {
        self.manager_id = Some(manager.clone());
        self
    }

    /// Returns true if `manager` is this user's line manager.
    pub fn reports_to(&self, manager: &UserId) -> bool {
        self.manager_id.as_ref() == Some(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId::new("E0001").to_string(), "E0001");
    }

    #[test]
    fn test_reporting_line() {
        let manager = User::new("M0001", "Sato");
        let user = User::new("E0001", "Suzuki").reporting_to(&manager.id);

        assert!(user.reports_to(&manager.id));
        assert!(!manager.reports_to(&user.id));
    }

    #[test]
    fn test_user_id_serializes_transparently() {
        let json = serde_json::to_string(&UserId::new("E0001")).unwrap();
        assert_eq!(json, "\"E0001\"");
    }

    #[test]
    fn test_user_deserialization_defaults_optional_fields() {
        let json = r#"{"id": "E0002", "name": "Tanaka"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, UserId::new("E0002"));
        assert!(user.manager_id.is_none());
        assert!(user.department.is_none());
    }
}
