//! Authorization context for authenticated requests

use uuid::Uuid;

use crate::claims::Payload;
use crate::error::AuthError;

/// Verified token payload, attached to the request by the authorization gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub payload: Payload,
}

impl AuthContext {
    pub fn new(payload: Payload) -> Self {
        Self { payload }
    }

    /// Subject identifier exactly as it appeared in the token
    pub fn subject(&self) -> &str {
        &self.payload.user_id
    }

    /// Subject parsed as a user id
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(self.subject()).map_err(|_| AuthError::InvalidUserId)
    }

    /// Check whether the authenticated subject is `user_id`
    pub fn is_user(&self, user_id: Uuid) -> bool {
        self.user_id().is_ok_and(|id| id == user_id)
    }
}
