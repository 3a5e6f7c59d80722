//! Domain entities for the Users domain

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use todo_common::{Error, Result};

/// Maximum first/last name length (varchar(100))
const MAX_NAME_LENGTH: usize = 100;

/// Maximum email length (varchar(255))
const MAX_EMAIL_LENGTH: usize = 255;

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub time_added: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl User {
    /// Create a new user from an already-hashed password
    pub fn new(
        first_name: String,
        last_name: String,
        email: &str,
        password_hash: String,
    ) -> Result<Self> {
        let first_name = validate_name("First name", first_name)?;
        let last_name = validate_name("Last name", last_name)?;

        let email = normalize_email(email);
        if email.is_empty() || email.len() > MAX_EMAIL_LENGTH || !email.contains('@') {
            return Err(Error::Validation("Email address is invalid".to_string()));
        }

        if password_hash.is_empty() {
            return Err(Error::Validation("Password hash is required".to_string()));
        }

        let now = Utc::now();
        Ok(User {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            password_hash,
            time_added: now,
            last_updated: now,
        })
    }
}

/// Emails are stored and looked up trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_name(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}
