//! User store.

use std::collections::HashMap;
use std::sync::Arc;

use chirp_common::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::entities::User;

#[derive(Default)]
struct Inner {
    /// Registration-ordered arena.
    users: Vec<User>,
    /// Id -> arena index.
    by_id: HashMap<String, usize>,
}

/// Store for user records.
///
/// Uniqueness of `username` and `email` is checked and the record inserted
/// under a single write guard, so concurrent registrations for the same
/// handle cannot both succeed.
#[derive(Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<Inner>>,
}

impl UserStore {
    /// Create an empty user store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user, enforcing username and email uniqueness.
    pub async fn insert(&self, user: User) -> AppResult<User> {
        let mut inner = self.inner.write().await;

        if inner.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(format!(
                "Username already taken: {}",
                user.username
            )));
        }
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!(
                "Email already registered: {}",
                user.email
            )));
        }

        let idx = inner.users.len();
        inner.by_id.insert(user.id.clone(), idx);
        inner.users.push(user.clone());

        Ok(user)
    }

    /// Find a user by id.
    pub async fn find_by_id(&self, id: &str) -> Option<User> {
        let inner = self.inner.read().await;
        inner.by_id.get(id).map(|&idx| inner.users[idx].clone())
    }

    /// Whether a user with the given id exists.
    pub async fn contains(&self, id: &str) -> bool {
        self.inner.read().await.by_id.contains_key(id)
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let inner = self.inner.read().await;
        inner.users.iter().find(|u| u.email == email).cloned()
    }

    /// Find a user by username.
    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        let inner = self.inner.read().await;
        inner.users.iter().find(|u| u.username == username).cloned()
    }

    /// All users in registration order.
    pub async fn all(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: &str, username: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            name: "Test User".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2$test".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = UserStore::new();
        store.insert(user("u1", "alice", "alice@example.com")).await.unwrap();

        assert_eq!(store.find_by_id("u1").await.unwrap().username, "alice");
        assert_eq!(
            store.find_by_email("alice@example.com").await.unwrap().id,
            "u1"
        );
        assert_eq!(store.find_by_username("alice").await.unwrap().id, "u1");
        assert!(store.find_by_id("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = UserStore::new();
        store.insert(user("u1", "alice", "alice@example.com")).await.unwrap();

        let result = store.insert(user("u2", "alice", "other@example.com")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = UserStore::new();
        store.insert(user("u1", "alice", "alice@example.com")).await.unwrap();

        let result = store.insert(user("u2", "bob", "alice@example.com")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_all_preserves_registration_order() {
        let store = UserStore::new();
        store.insert(user("u1", "alice", "alice@example.com")).await.unwrap();
        store.insert(user("u2", "bob", "bob@example.com")).await.unwrap();

        let ids: Vec<_> = store.all().await.into_iter().map(|u| u.id).collect();
        assert_eq!(ids, ["u1", "u2"]);
    }
}
