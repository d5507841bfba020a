//! Error taxonomy of the authentication core

use common::error::StoreError;
use thiserror::Error;

use crate::jwt::TokenError;

/// Error returned by the authentication services
#[derive(Error, Debug)]
pub enum AuthError {
    /// Required input is missing or malformed
    #[error("{0}")]
    ValidationFailed(String),

    /// The email is already registered
    #[error("user already exists")]
    DuplicateIdentity,

    /// Unknown email or wrong password; the two are deliberately not distinguished
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The addressed user does not exist
    #[error("user not found")]
    NotFound,

    /// The credential store failed
    #[error("{op}: {source}")]
    StoreUnavailable {
        op: &'static str,
        #[source]
        source: StoreError,
    },

    /// Password hashing failed
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Token issuance or verification failed
    #[error(transparent)]
    Token(#[from] TokenError),

    /// A background task could not complete
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Translate a store failure, keeping the operation tag for diagnostics
    pub fn from_store(op: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::Duplicate => AuthError::DuplicateIdentity,
            StoreError::NotFound => AuthError::NotFound,
            source => AuthError::StoreUnavailable { op, source },
        }
    }

    /// Whether the error stems from a server-side fault rather than client input
    pub fn is_internal(&self) -> bool {
        match self {
            AuthError::StoreUnavailable { .. }
            | AuthError::Hashing(_)
            | AuthError::Internal(_) => true,
            AuthError::Token(err) => err.is_internal(),
            _ => false,
        }
    }
}

/// Type alias for Result with AuthError
pub type AuthResult<T> = Result<T, AuthError>;
