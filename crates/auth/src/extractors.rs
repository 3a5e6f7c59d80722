//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::backend::AuthBackend;
use crate::context::AuthContext;
use crate::error::AuthError;

/// Authenticated caller extractor
///
/// Behind `require_auth` this yields the context the gate already verified;
/// elsewhere it authenticates the request itself.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthContext);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        if let Some(context) = parts.extensions.get::<AuthContext>() {
            return Ok(AuthUser(context.clone()));
        }

        let backend = AuthBackend::from_ref(state);
        let context = backend.authenticate(&parts.headers)?;
        parts.extensions.insert(context.clone());

        Ok(AuthUser(context))
    }
}
