//! JWT service for token issuance and verification
//!
//! Tokens are HS256-signed JSON Web Tokens carrying the user id as subject,
//! the issue and expiry times, and the configured issuer. They are stateless:
//! nothing is persisted and a token stays valid for its whole lifetime.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::UserId;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Longest accepted token lifetime: 24 hours
pub const MAX_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// JWT configuration
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Symmetric signing secret, shared by issuance and verification
    pub secret: String,
    /// Value of the `iss` claim (default: "notekeep")
    pub issuer: String,
    /// Token lifetime in seconds (default: 900, i.e. 15 minutes)
    pub token_ttl_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: "notekeep".to_string(),
            token_ttl_secs: 900,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("issuer", &self.issuer)
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID, as a decimal string
    pub sub: String,
    /// Issued at time (seconds since epoch)
    pub iat: i64,
    /// Expiration time (seconds since epoch)
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

/// Reasons a token can be rejected or fail to be produced
#[derive(Error, Debug)]
pub enum TokenError {
    /// The string is not a structurally valid token
    #[error("malformed token")]
    Malformed,

    /// The signature does not match the header and claims
    #[error("bad token signature")]
    BadSignature,

    /// The token lifetime is over
    #[error("token expired")]
    Expired,

    /// The header names a signing algorithm other than the configured one
    #[error("unexpected signing algorithm")]
    WrongAlgorithm,

    /// The token was issued by someone else
    #[error("unexpected token issuer")]
    InvalidIssuer,

    /// The subject is not a valid user id
    #[error("invalid token subject")]
    InvalidSubject,

    /// Signing a new token failed
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// The service cannot be built from the given configuration
    #[error("invalid JWT configuration: {0}")]
    Configuration(String),
}

impl TokenError {
    fn from_jwt(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
                TokenError::WrongAlgorithm
            }
            ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
            _ => TokenError::Malformed,
        }
    }

    /// Whether the failure is on the server side rather than in the presented token
    pub fn is_internal(&self) -> bool {
        matches!(self, TokenError::Signing(_) | TokenError::Configuration(_))
    }
}

/// JWT service
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl_secs: i64,
}

impl TokenService {
    /// Initialize a new JWT service
    pub fn new(config: &JwtConfig) -> Result<Self, TokenError> {
        if config.secret.is_empty() {
            return Err(TokenError::Configuration("signing secret is empty".into()));
        }
        if config.issuer.is_empty() {
            return Err(TokenError::Configuration("issuer is empty".into()));
        }
        if config.token_ttl_secs == 0 || config.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(TokenError::Configuration(format!(
                "token TTL must be between 1 and {} seconds",
                MAX_TOKEN_TTL_SECS
            )));
        }
        let ttl_secs = config.token_ttl_secs as i64;

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["sub", "exp", "iss"]);

        Ok(TokenService {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            ttl_secs,
        })
    }

    /// Issue a token for a user, valid from now for the configured TTL
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    pub(crate) fn issue_at(&self, user_id: UserId, issued_at: i64) -> Result<String, TokenError> {
        let exp = issued_at
            .checked_add(self.ttl_secs)
            .ok_or_else(|| TokenError::Configuration("token expiry overflows".into()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at,
            exp,
            iss: self.issuer.clone(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key).map_err(TokenError::Signing)
    }

    /// Verify a token and return the user it was issued for
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!("Token rejected by decoder: {}", e);
            TokenError::from_jwt(e)
        })?;

        // The decoder accepts exp == now; a token is expired from that instant on.
        if Utc::now().timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        data.claims
            .sub
            .parse::<UserId>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or(TokenError::InvalidSubject)
    }

    /// Get the token lifetime in seconds
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs as u64
    }
}
