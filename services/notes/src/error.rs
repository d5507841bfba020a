//! Custom error types for the notes API
//!
//! Client-facing messages never carry lower-layer error text; internal
//! causes are logged here and replaced with a fixed message.

use auth::AuthError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Custom error type for the notes API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed input
    #[error("{0}")]
    BadRequest(String),

    /// The email is already registered
    #[error("user already exists")]
    Conflict,

    /// Login failed
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Missing, invalid or expired bearer token
    #[error("Unauthorized")]
    Unauthenticated,

    /// The note does not exist or belongs to someone else
    #[error("note not found")]
    NotFound,

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::InvalidCredentials | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::ValidationFailed(msg) => ApiError::BadRequest(msg),
            AuthError::DuplicateIdentity => ApiError::Conflict,
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::NotFound => ApiError::NotFound,
            AuthError::Token(e) if !e.is_internal() => ApiError::Unauthenticated,
            err => {
                error!(error = %err, "Authentication request failed");
                ApiError::InternalServerError
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            // The token outlived its account
            StoreError::MissingReference => {
                warn!("Request for a user that no longer exists");
                ApiError::Unauthenticated
            }
            err => {
                error!(error = %err, "Note store request failed");
                ApiError::InternalServerError
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
