//! Authentication backend shared by the authorization gate and the login flow

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

use crate::claims::Payload;
use crate::codec::{TokenCodec, TokenError};
use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;

/// Authentication backend holding the process-wide token codec
#[derive(Clone, Debug)]
pub struct AuthBackend {
    codec: Arc<TokenCodec>,
}

impl AuthBackend {
    /// Build the backend; fails when the secret is empty
    pub fn new(config: &AuthConfig) -> Result<Self, TokenError> {
        let codec = TokenCodec::new(config.jwt_secret.as_bytes(), config.token_ttl)?;
        Ok(Self {
            codec: Arc::new(codec),
        })
    }

    /// Issue a token for `subject`
    pub fn issue_token(&self, subject: impl Into<String>) -> Result<String, TokenError> {
        self.codec.encode(&Payload::new(subject))
    }

    /// Authenticate a request from its headers.
    ///
    /// A missing `Authorization` header is decoded as an empty credential and
    /// therefore always rejected.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthContext, AuthError> {
        let header = headers.get(AUTHORIZATION);
        let credential = match header {
            Some(value) => extract_bearer_token(value)?,
            None => String::new(),
        };

        match self.codec.decode(&credential) {
            Ok(payload) => Ok(AuthContext::new(payload)),
            Err(_) if header.is_none() => Err(AuthError::MissingAuthorization),
            Err(err) => Err(AuthError::InvalidToken(err)),
        }
    }
}

/// Extract the credential from an Authorization header, stripping a leading `"Bearer "`
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    Ok(header_str
        .strip_prefix("Bearer ")
        .unwrap_or(header_str)
        .to_string())
}
