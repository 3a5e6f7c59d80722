//! Token payload and wire claims

use serde::{Deserialize, Serialize};

/// Claim key carrying the subject identifier
pub const SUBJECT_CLAIM: &str = "userid";

/// Authenticated subject carried inside a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// Subject identifier (a user id in practice, opaque to the codec)
    pub user_id: String,
}

impl Payload {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Claim set as it appears on the wire
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TokenClaims {
    /// Subject identifier, serialized under `SUBJECT_CLAIM`
    pub userid: String,
    /// Expiry (seconds since epoch); only present when a token lifetime is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}
