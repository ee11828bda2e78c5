//! Identity resolution.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::{User, UserId};

/// Resolves caller identifiers to users.
///
/// The engine never creates or edits users; it only asks who someone is and,
/// for scoped manager queries, who reports to them.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolves an identifier (employee number) to a user.
    ///
    /// Unknown identifiers fail with `UserNotFound`.
    async fn resolve(&self, identifier: &str) -> EngineResult<User>;

    /// Returns the ids of the users whose line manager is `manager`.
    async fn direct_reports(&self, manager: &UserId) -> EngineResult<Vec<UserId>>;
}

/// A directory backed by a map, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let directory = Self::new();
        for user in users {
            directory.insert(user);
        }
        directory
    }

    /// Adds or replaces a user.
    pub fn insert(&self, user: User) {
        self.users.write().insert(user.id.clone(), user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn resolve(&self, identifier: &str) -> EngineResult<User> {
        self.users
            .read()
            .get(&UserId::new(identifier))
            .cloned()
            .ok_or_else(|| EngineError::UserNotFound {
                identifier: identifier.to_string(),
            })
    }

    async fn direct_reports(&self, manager: &UserId) -> EngineResult<Vec<UserId>> {
        let mut reports: Vec<UserId> = self
            .users
            .read()
            .values()
            .filter(|user| user.reports_to(manager))
            .map(|user| user.id.clone())
            .collect();
        reports.sort();
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> InMemoryDirectory {
        let manager = User::new("M0001", "Sato");
        InMemoryDirectory::with_users([
            User::new("E0002", "Tanaka").reporting_to(&manager.id),
            User::new("E0001", "Suzuki").reporting_to(&manager.id),
            User::new("E0003", "Ito"),
            manager,
        ])
    }

    #[tokio::test]
    async fn test_resolve_known_user() {
        let user = directory().resolve("E0001").await.unwrap();
        assert_eq!(user.name, "Suzuki");
    }

    #[tokio::test]
    async fn test_resolve_unknown_user() {
        match directory().resolve("X9999").await {
            Err(EngineError::UserNotFound { identifier }) => assert_eq!(identifier, "X9999"),
            other => panic!("Expected UserNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_direct_reports_sorted() {
        let reports = directory()
            .direct_reports(&UserId::new("M0001"))
            .await
            .unwrap();
        assert_eq!(reports, vec![UserId::new("E0001"), UserId::new("E0002")]);
    }

    #[tokio::test]
    async fn test_direct_reports_empty_for_non_manager() {
        let reports = directory()
            .direct_reports(&UserId::new("E0003"))
            .await
            .unwrap();
        assert!(reports.is_empty());
    }
}
