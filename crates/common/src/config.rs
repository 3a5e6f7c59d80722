//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_RUST_LOG: &str = "todo=info,tower_http=info";

/// Output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Clone)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Shared secret used to sign and verify auth tokens
    pub jwt_secret: String,

    /// Lifetime of issued tokens; `None` issues tokens without an `exp` claim
    pub token_ttl: Option<Duration>,

    /// Runtime configuration
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Fails when a required value is missing or malformed, so a bad deployment
    /// aborts at startup instead of on the first request.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required"))?;

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| anyhow::anyhow!("JWT_SECRET is required and must not be empty"))?;

        let token_ttl = match lookup("JWT_TTL_SECONDS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("JWT_TTL_SECONDS must be a whole number"))?;
                if secs == 0 {
                    anyhow::bail!("JWT_TTL_SECONDS must be greater than zero");
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number"))?,
            None => DEFAULT_PORT,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl,
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_RUST_LOG.to_string()),
            log_format,
        })
    }
}

impl fmt::Debug for Config {
    #[mutants::skip] // Formatting only
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("log_format", &self.log_format)
            .finish()
    }
}
