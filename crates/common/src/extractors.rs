//! Custom axum extractors shared by the domain crates

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use uuid::Uuid;
use validator::Validate;

use crate::Error;

/// Default page size for list endpoints
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for list endpoints
const MAX_LIMIT: i64 = 100;

/// Keyset pagination query parameters: `?lastId=<uuid>&limit=<n>`
///
/// Pages are ordered by id; `lastId` is the last id of the previous page.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPagination {
    #[serde(default)]
    pub last_id: Option<Uuid>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl CursorPagination {
    /// Id after which the page starts, if any
    pub fn after(&self) -> Option<Uuid> {
        self.last_id
    }

    /// Get the limit, defaulting to 50, capped at 100
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

/// Parse a path id, treating anything that is not a UUID as a missing record
pub fn parse_path_id(raw: &str, not_found_message: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|_| Error::NotFound(not_found_message.to_string()))
}

/// JSON extractor that validates the deserialized value automatically.
///
/// All input errors (deserialization + validation) return 400 with the
/// `{"status":"error","message":...}` envelope.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[derive(Debug)]
pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Validation(Error),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            ValidatedJsonRejection::Json(e) => {
                tracing::debug!(error = %e.body_text(), "Rejected JSON payload");
                Error::Validation("invalid json payload".to_string()).into_response()
            }
            ValidatedJsonRejection::Validation(e) => e.into_response(),
        }
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;
        value.validate().map_err(|e| {
            ValidatedJsonRejection::Validation(Error::Validation(format!(
                "Validation failed: {}",
                e
            )))
        })?;
        Ok(ValidatedJson(value))
    }
}

/// Query string extractor whose rejection uses the error envelope
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

#[derive(Debug)]
pub struct QueryParamsRejection(QueryRejection);

impl IntoResponse for QueryParamsRejection {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self.0.body_text(), "Rejected query string");
        Error::Validation("invalid query parameters".to_string()).into_response()
    }
}

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = QueryParamsRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(QueryParamsRejection)?;
        Ok(QueryParams(value))
    }
}
