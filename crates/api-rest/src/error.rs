//! HTTP mapping for request failures.
//!
//! Every failure becomes a JSON body of the form `{"message": "..."}` with a fixed message per
//! error kind. Internal faults are logged with their cause and reported to the client as an
//! opaque `500 Internal Server Error`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use users_core::CoreError;
use utoipa::ToSchema;

pub const INVALID_USER_ID: &str = "Invalid userId format";
pub const USER_NOT_FOUND: &str = "User not found";
pub const MISSING_REQUIRED_FIELDS: &str = "Username and age are required fields";
pub const INVALID_HOBBIES: &str = "Hobbies must be an array of strings";
pub const ENDPOINT_NOT_FOUND: &str = "Endpoint not found";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Body of every error response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid userId format")]
    InvalidUserId,
    #[error("User not found")]
    UserNotFound,
    #[error("Username and age are required fields")]
    MissingRequiredFields,
    #[error("Hobbies must be an array of strings")]
    InvalidHobbies,
    #[error("Endpoint not found")]
    EndpointNotFound,
    /// Cause is logged, never sent.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidUserId
            | ApiError::MissingRequiredFields
            | ApiError::InvalidHobbies => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound | ApiError::EndpointNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::InvalidUserId => INVALID_USER_ID,
            ApiError::UserNotFound => USER_NOT_FOUND,
            ApiError::MissingRequiredFields => MISSING_REQUIRED_FIELDS,
            ApiError::InvalidHobbies => INVALID_HOBBIES,
            ApiError::EndpointNotFound => ENDPOINT_NOT_FOUND,
            ApiError::Internal(_) => INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal(cause: impl std::fmt::Display) -> Self {
        ApiError::Internal(cause.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingRequiredFields => ApiError::MissingRequiredFields,
            CoreError::InvalidHobbies => ApiError::InvalidHobbies,
            CoreError::UserNotFound(_) => ApiError::UserNotFound,
            CoreError::Uuid(_) => ApiError::InvalidUserId,
            CoreError::StorePoisoned | CoreError::InvalidConfig(_) => ApiError::internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(cause) = &self {
            tracing::error!("Internal server error: {}", cause);
        }
        (self.status(), Json(MessageRes::new(self.message()))).into_response()
    }
}
