//! Shared database helpers for domain repositories

use crate::error::Error;

/// Map a unique-constraint violation to `Error::Conflict`, passing other errors through.
pub fn conflict_on_unique(err: sqlx::Error, message: impl Into<String>) -> Error {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Error::Conflict(message.into())
        }
        _ => Error::Database(err),
    }
}
