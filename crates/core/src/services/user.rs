//! User service.

use chirp_common::{AppError, AppResult, IdGenerator, crypto};
use chirp_store::{UserStore, entities::User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User service for registration, authentication and lookup.
#[derive(Clone)]
pub struct UserService {
    user_store: UserStore,
    id_gen: IdGenerator,
}

/// Input for registering a new user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Public view of a user. Excludes the credential hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub fn new(user_store: UserStore) -> Self {
        Self {
            user_store,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new user.
    ///
    /// The password is hashed on a blocking task; no store guard is held
    /// while hashing runs. Username and email uniqueness is enforced
    /// atomically by the store on insert.
    pub async fn register(&self, input: CreateUserInput) -> AppResult<User> {
        input.validate()?;

        let password = input.password;
        let password_hash = tokio::task::spawn_blocking(move || crypto::hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {e}")))??;

        let user = User {
            id: self.id_gen.generate(),
            name: input.name,
            username: input.username,
            email: input.email,
            password_hash,
            created_at: Utc::now(),
        };

        let user = self.user_store.insert(user).await?;
        tracing::debug!(user_id = %user.id, username = %user.username, "Registered user");

        Ok(user)
    }

    /// Authenticate a user by email and password.
    ///
    /// Returns [`AppError::Unauthorized`] for both an unknown email and a
    /// wrong password, so callers cannot probe which emails are registered.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .user_store
            .find_by_email(email)
            .await
            .ok_or(AppError::Unauthorized)?;

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || crypto::verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {e}")))??;

        if !valid {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }

    /// Get a user by id, failing if absent.
    pub async fn get_by_id(&self, id: &str) -> AppResult<User> {
        self.user_store
            .find_by_id(id)
            .await
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }

    /// Find a user by id.
    pub async fn find_by_id(&self, id: &str) -> Option<User> {
        self.user_store.find_by_id(id).await
    }

    /// All users in registration order.
    pub async fn list(&self) -> Vec<UserView> {
        self.user_store
            .all()
            .await
            .into_iter()
            .map(UserView::from)
            .collect()
    }
}
