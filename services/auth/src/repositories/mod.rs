//! Credential storage
//!
//! Services depend on the [`CredentialStore`] capability only; the SQLite
//! implementation backs the running service and the in-memory one backs
//! tests and local experiments.

use async_trait::async_trait;
use common::error::StoreResult;

use crate::models::{User, UserId};

pub mod memory;
pub mod user;

pub use memory::InMemoryCredentialStore;
pub use user::SqliteCredentialStore;

/// Persistence port for user credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a user, failing with `StoreError::Duplicate` if the email is taken
    async fn create(&self, email: &str, password_hash: &str) -> StoreResult<UserId>;

    /// Look a user up by exact email, failing with `StoreError::NotFound`
    async fn find_by_email(&self, email: &str) -> StoreResult<User>;

    /// Remove a user, failing with `StoreError::NotFound` if absent
    async fn delete(&self, id: UserId) -> StoreResult<()>;

    /// Whether a user with this id currently exists
    async fn exists(&self, id: UserId) -> StoreResult<bool>;
}
