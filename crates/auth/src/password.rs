//! Password hashing with bcrypt
//!
//! Hashing is CPU-bound, so both operations run on the blocking thread pool.

use bcrypt::DEFAULT_COST;

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (bcrypt only reads the first 72 bytes)
pub const MAX_PASSWORD_LENGTH: usize = 72;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hashing(String),

    #[error("failed to verify password: {0}")]
    Verification(String),
}

impl From<PasswordError> for todo_common::Error {
    fn from(err: PasswordError) -> Self {
        todo_common::Error::Internal(err.to_string())
    }
}

/// Hash a password with the default bcrypt cost
pub async fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with_cost(password, DEFAULT_COST).await
}

/// Hash a password with an explicit bcrypt cost
pub async fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || {
        bcrypt::hash(password, cost).map_err(|e| PasswordError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| PasswordError::Hashing(format!("task join error: {}", e)))?
}

/// Check `password` against a stored bcrypt hash.
///
/// `Ok(false)` on mismatch; `Err` only when the hash itself is unusable.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || {
        bcrypt::verify(password, &hash).map_err(|e| PasswordError::Verification(e.to_string()))
    })
    .await
    .map_err(|e| PasswordError::Verification(format!("task join error: {}", e)))?
}
