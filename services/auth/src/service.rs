//! Registration and login orchestration

use std::sync::Arc;

use common::error::StoreError;
use tracing::{info, warn};

use crate::{
    error::{AuthError, AuthResult},
    jwt::TokenService,
    models::UserId,
    password::PasswordHasher,
    repositories::CredentialStore,
    validation::{validate_email, validate_password},
};

/// Authentication service
///
/// Cheap to clone; all clones share the same store, hasher and signing key.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(store: Arc<dyn CredentialStore>, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }

    /// Register a new user and return its id
    pub async fn register(&self, email: &str, password: &str) -> AuthResult<UserId> {
        validate_email(email)?;
        validate_password(password)?;

        let password_hash = self.hasher.hash_blocking(password).await?;

        let id = self
            .store
            .create(email, &password_hash)
            .await
            .map_err(|e| AuthError::from_store("auth.register", e))?;

        info!(user_id = id, "User registered");
        Ok(id)
    }

    /// Check credentials and issue a token.
    ///
    /// An unknown email and a wrong password both yield
    /// [`AuthError::InvalidCredentials`], and both cost one hash evaluation.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<String> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::ValidationFailed(
                "email and password are required".to_string(),
            ));
        }

        let user = match self.store.find_by_email(email).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                // Burn the same work as a real verification.
                let _ = self.hasher.hash_blocking(password).await?;
                warn!("Login failed: invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(AuthError::from_store("auth.login", e)),
        };

        if !self
            .hasher
            .verify_blocking(password, &user.password_hash)
            .await?
        {
            warn!("Login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id)?;

        info!(user_id = user.id, "User logged in");
        Ok(token)
    }

    /// Delete a user by id
    pub async fn delete_user(&self, id: UserId) -> AuthResult<()> {
        self.store
            .delete(id)
            .await
            .map_err(|e| AuthError::from_store("auth.delete_user", e))?;

        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// The token service used for issuance
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}
