//! Authentication core for the notekeep service
//!
//! Credential storage, Argon2 password hashing, JWT issuance and
//! verification, and the registration/login flows built on top of them.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use auth::{
//!     AuthService, HasherConfig, InMemoryCredentialStore, JwtConfig, PasswordHasher,
//!     TokenService,
//! };
//!
//! # async fn example() -> Result<(), auth::AuthError> {
//! let tokens = TokenService::new(&JwtConfig {
//!     secret: "change-me".to_string(),
//!     ..JwtConfig::default()
//! })?;
//! let hasher = PasswordHasher::new(&HasherConfig::default())?;
//! let service = AuthService::new(Arc::new(InMemoryCredentialStore::new()), hasher, tokens);
//!
//! let id = service.register("a@x.com", "pw1").await?;
//! let token = service.login("a@x.com", "pw1").await?;
//! assert_eq!(service.tokens().verify(&token)?, id);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod jwt;
pub mod models;
pub mod password;
pub mod repositories;
pub mod service;
pub mod validation;

pub use error::{AuthError, AuthResult};
pub use jwt::{JwtConfig, MAX_TOKEN_TTL_SECS, TokenError, TokenService};
pub use models::{Credentials, User, UserId};
pub use password::{HasherConfig, PasswordHasher};
pub use repositories::{CredentialStore, InMemoryCredentialStore, SqliteCredentialStore};
pub use service::AuthService;
