//! Authentication configuration

use std::fmt;
use std::time::Duration;

use todo_common::Config;

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Option<Duration>,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl: Option<Duration>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl,
        }
    }
}

impl From<&Config> for AuthConfig {
    fn from(config: &Config) -> Self {
        Self::new(config.jwt_secret.clone(), config.token_ttl)
    }
}

impl fmt::Debug for AuthConfig {
    #[mutants::skip] // Formatting only
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
