//! Password hashing utilities.
//!
//! Credentials are stored as Argon2 hashes; the raw password never leaves
//! the registration and login paths. Verification goes through the parsed
//! hash, so comparison effort does not depend on the candidate password.
//!
//! Hashing is CPU-bound — callers on an async runtime should run these
//! functions on a blocking task and must not hold a store guard across them.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::{AppError, AppResult};

/// Hash a password using Argon2.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails (e.g. insufficient
/// randomness for the salt).
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored hash.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the stored hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
