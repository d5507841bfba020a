//! User repository backed by SQLite

use async_trait::async_trait;
use chrono::Utc;
use common::error::{StoreError, StoreResult};
use sqlx::SqlitePool;
use tracing::info;

use super::CredentialStore;
use crate::models::{User, UserId};

/// User repository
#[derive(Clone)]
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn create(&self, email: &str, password_hash: &str) -> StoreResult<UserId> {
        let id: UserId = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, password_hash, created_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::tag("users.create"))?;

        info!(user_id = id, "User row inserted");
        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::tag("users.find_by_email"))?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: UserId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::tag("users.delete"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        info!(user_id = id, "User row deleted");
        Ok(())
    }

    async fn exists(&self, id: UserId) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::tag("users.exists"))
    }
}
