//! Request extractors for the users routes.
//!
//! - [`UserIdPath`] reads the `:user_id` path segment and validates its format. Any failure,
//!   including an undecodable segment, is reported as `400 Invalid userId format`.
//! - [`UserBody`] reads the request body as a loosely shaped [`UserPayload`].
//!
//! ## Body handling
//! - Only `application/json` bodies are parsed. Any other (or missing) content type yields an
//!   empty payload, which then fails the required-field check.
//! - An empty body is an empty payload.
//! - A top-level JSON array is accepted by the parser but carries no fields, so it is also an
//!   empty payload.
//! - Malformed JSON, or a top-level scalar, is an internal fault (`500`).

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap},
};
use serde_json::Value;
use users_core::{UserId, UserPayload};

use crate::error::ApiError;

/// A validated `:user_id` path segment.
#[derive(Clone, Debug)]
pub struct UserIdPath(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!("Unreadable userId path segment: {}", e);
                ApiError::InvalidUserId
            })?;

        UserId::parse(&raw)
            .map(UserIdPath)
            .map_err(|_| ApiError::InvalidUserId)
    }
}

/// A create/update request body.
#[derive(Clone, Debug, Default)]
pub struct UserBody(pub UserPayload);

#[async_trait]
impl<S> FromRequest<S> for UserBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Ok(Self::default());
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::internal(format!("failed to read request body: {}", e)))?;

        parse_body(&bytes).map(UserBody)
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn parse_body(bytes: &[u8]) -> Result<UserPayload, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(UserPayload::default());
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ApiError::internal(format!("malformed JSON body: {}", e)))?;

    match value {
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| ApiError::internal(format!("unreadable JSON body: {}", e))),
        Value::Array(_) => Ok(UserPayload::default()),
        _ => Err(ApiError::internal("JSON body must be an object or array")),
    }
}
