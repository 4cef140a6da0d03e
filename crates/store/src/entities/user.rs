//! User entity.

use chrono::{DateTime, Utc};

/// A registered user.
///
/// The record is immutable after registration: there is no in-core
/// profile editing, password change, or deletion. `username` and `email`
/// are unique across all users; [`crate::UserStore`] enforces this on
/// insert. The credential is only ever stored hashed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unique handle.
    pub username: String,

    /// Unique login credential subject.
    pub email: String,

    /// Argon2 hash of the password. Never serialized into API views.
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}
