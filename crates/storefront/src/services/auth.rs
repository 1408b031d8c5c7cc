//! Admin gate authentication.
//!
//! A single operator password, stored as an argon2 PHC hash in the
//! environment and verified at login. The admin flag lives in the session;
//! there is no account model, lockout, or throttling.

use argon2::password_hash::PasswordHash;
use argon2::{Argon2, PasswordVerifier};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Authentication failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The supplied password does not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The stored hash could not be parsed (configuration defect).
    #[error("stored password hash is invalid: {0}")]
    InvalidHash(String),
}

/// Verify a login attempt against the stored hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on a wrong password and
/// `AuthError::InvalidHash` if the configured hash cannot be parsed.
pub fn verify_admin_password(
    password_hash: &SecretString,
    candidate: &str,
) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(password_hash.expose_secret())
        .map_err(|e| AuthError::InvalidHash(e.to_string()))?;

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}
