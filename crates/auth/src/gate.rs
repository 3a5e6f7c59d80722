//! Authorization gate middleware
//!
//! Wraps protected routes: the request reaches the handler only when its
//! bearer credential decodes with the process-wide codec. The verified
//! payload is then available to handlers as an `AuthContext` extension.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::backend::AuthBackend;
use crate::error::AuthError;

/// Reject the request with 401 unless it carries a valid token
///
/// Install with `middleware::from_fn_with_state(backend, require_auth)`.
pub async fn require_auth(
    State(backend): State<AuthBackend>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let context = backend.authenticate(request.headers())?;

    tracing::debug!(
        subject = %context.subject(),
        path = %request.uri().path(),
        "Request authorized"
    );

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}
