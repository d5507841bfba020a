//! In-memory credential store

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use common::error::{StoreError, StoreResult};
use tokio::sync::Mutex;

use super::CredentialStore;
use crate::models::{User, UserId};

#[derive(Debug, Default)]
struct Users {
    by_email: HashMap<String, User>,
    last_id: UserId,
}

/// Credential store keeping users in process memory
///
/// Check-and-insert happens under one lock, so concurrent registrations of
/// the same email resolve to exactly one winner.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    users: Arc<Mutex<Users>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(&self, email: &str, password_hash: &str) -> StoreResult<UserId> {
        let mut users = self.users.lock().await;
        if users.by_email.contains_key(email) {
            return Err(StoreError::Duplicate);
        }

        users.last_id += 1;
        let user = User {
            id: users.last_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.by_email.insert(user.email.clone(), user);

        Ok(users.last_id)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<User> {
        let users = self.users.lock().await;
        users.by_email.get(email).cloned().ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: UserId) -> StoreResult<()> {
        let mut users = self.users.lock().await;
        let email = users
            .by_email
            .values()
            .find(|user| user.id == id)
            .map(|user| user.email.clone())
            .ok_or(StoreError::NotFound)?;

        users.by_email.remove(&email);
        Ok(())
    }

    async fn exists(&self, id: UserId) -> StoreResult<bool> {
        let users = self.users.lock().await;
        Ok(users.by_email.values().any(|user| user.id == id))
    }
}
