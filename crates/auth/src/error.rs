//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::codec::TokenError;

/// Message shown for every rejected request
pub const UNAUTHORIZED_MESSAGE: &str = "you are not authorized to proceed";

/// Authentication error
///
/// Variants exist for logging only; every one renders the same 401 body.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header missing")]
    MissingAuthorization,

    #[error("Authorization header is not valid text")]
    InvalidAuthorizationFormat,

    #[error("{0}")]
    InvalidToken(TokenError),

    #[error("token subject is not a valid user id")]
    InvalidUserId,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self, "Request rejected by authorization gate");

        let body = Json(json!({
            "status": "unauthorized",
            "message": UNAUTHORIZED_MESSAGE,
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

impl From<AuthError> for todo_common::Error {
    fn from(err: AuthError) -> Self {
        tracing::debug!(reason = %err, "Authentication failed");
        todo_common::Error::Authentication(UNAUTHORIZED_MESSAGE.to_string())
    }
}
