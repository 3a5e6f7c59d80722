//! Authentication for the to-do API
//!
//! Provides the token codec (signed compact tokens carrying a subject id),
//! the authorization gate (axum middleware + extractor) that works with any
//! domain state implementing `FromRef<S>` for `AuthBackend`, and password
//! hashing for the login flow.

mod backend;
mod claims;
pub mod codec;
mod config;
mod context;
mod error;
mod extractors;
mod gate;
pub mod password;

pub use backend::AuthBackend;
pub use claims::{Payload, SUBJECT_CLAIM};
pub use codec::{TokenCodec, TokenError};
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::{AuthError, UNAUTHORIZED_MESSAGE};
pub use extractors::AuthUser;
pub use gate::require_auth;
pub use password::{hash_password, verify_password, PasswordError};
