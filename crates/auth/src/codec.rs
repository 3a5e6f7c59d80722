//! Token codec
//!
//! Issues and verifies compact HMAC-signed tokens (`header.claims.signature`)
//! whose claim set carries a single subject identifier. The declared algorithm
//! is inspected before the signature is checked, so `alg: none` and asymmetric
//! algorithm names are refused outright.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;

use crate::claims::{Payload, TokenClaims};

/// Algorithm used when signing
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Algorithm names accepted when verifying
const ACCEPTED_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Token encode/decode failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("secret key must be provided")]
    Configuration,

    #[error("malformed token: {0}")]
    Malformed(&'static str),

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("unexpected signing algorithm: {found}")]
    AlgorithmMismatch { found: String },

    #[error("token has expired")]
    Expired,

    #[error("invalid token claims: {0}")]
    InvalidClaims(&'static str),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Map a verification failure, naming the algorithm the token declared
fn verification_error(err: jsonwebtoken::errors::Error, declared_alg: &str) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::AlgorithmMismatch {
                found: declared_alg.to_string(),
            }
        }
        ErrorKind::MissingRequiredClaim(_) => {
            TokenError::InvalidClaims("required claim is missing")
        }
        // Well-formed JSON of the wrong shape is a claims problem; anything else is not JSON
        ErrorKind::Json(e) if e.classify() == serde_json::error::Category::Data => {
            TokenError::InvalidClaims("subject must be a string")
        }
        ErrorKind::Json(_) => TokenError::Malformed("claims are not a JSON object"),
        _ => TokenError::Malformed("token could not be parsed"),
    }
}

/// Only the header field needed to refuse a token before verification
#[derive(Deserialize)]
struct DeclaredHeader {
    alg: String,
}

/// Encodes payloads into signed tokens and verifies them back.
///
/// Holds the derived keys and validation rules; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl TokenCodec {
    /// Build a codec for `secret_key`. With a `ttl`, issued tokens carry an
    /// `exp` claim and decoding requires it.
    pub fn new(secret_key: &[u8], ttl: Option<Duration>) -> Result<Self, TokenError> {
        if secret_key.is_empty() {
            return Err(TokenError::Configuration);
        }

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::new();
        if ttl.is_some() {
            validation.required_spec_claims.insert("exp".to_string());
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret_key),
            decoding_key: DecodingKey::from_secret(secret_key),
            validation,
            ttl,
        })
    }

    /// Sign `payload` into a compact token
    pub fn encode(&self, payload: &Payload) -> Result<String, TokenError> {
        if payload.user_id.is_empty() {
            return Err(TokenError::InvalidClaims("subject must not be empty"));
        }

        let claims = TokenClaims {
            userid: payload.user_id.clone(),
            exp: self
                .ttl
                .map(|ttl| jsonwebtoken::get_current_timestamp() + ttl.as_secs()),
        };

        jsonwebtoken::encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify `token` and recover its payload
    pub fn decode(&self, token: &str) -> Result<Payload, TokenError> {
        let alg = declared_algorithm(token)?;
        if !ACCEPTED_ALGORITHMS.contains(&alg.as_str()) {
            return Err(TokenError::AlgorithmMismatch { found: alg });
        }

        let data =
            jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| verification_error(e, &alg))?;

        if data.claims.userid.is_empty() {
            return Err(TokenError::InvalidClaims("subject must not be empty"));
        }

        Ok(Payload::new(data.claims.userid))
    }
}

impl fmt::Debug for TokenCodec {
    #[mutants::skip] // Formatting only
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret_key", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Sign `payload` with `secret_key`; tokens never expire
pub fn encode(secret_key: &[u8], payload: &Payload) -> Result<String, TokenError> {
    TokenCodec::new(secret_key, None)?.encode(payload)
}

/// Verify `token` against `secret_key`
pub fn decode(secret_key: &[u8], token: &str) -> Result<Payload, TokenError> {
    TokenCodec::new(secret_key, None)?.decode(token)
}

fn declared_algorithm(token: &str) -> Result<String, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Malformed("expected three segments"));
    }

    let header = URL_SAFE_NO_PAD
        .decode(segments[0])
        .map_err(|_| TokenError::Malformed("header is not base64url"))?;
    let header: DeclaredHeader = serde_json::from_slice(&header)
        .map_err(|_| TokenError::Malformed("header is not a JSON object with alg"))?;

    Ok(header.alg)
}
