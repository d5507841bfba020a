//! Password hashing with Argon2id
//!
//! Every hash gets a fresh random salt, so hashing the same password twice
//! yields different digests. Verification reads the algorithm parameters
//! from the stored PHC string, which keeps older digests verifiable after
//! the configured cost changes.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
    password_hash::SaltString,
};
use serde::Deserialize;
use tracing::warn;

use crate::error::{AuthError, AuthResult};

/// Argon2 cost parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    /// Memory cost in KiB (default: 19456, i.e. 19 MiB)
    pub memory_kib: u32,
    /// Number of passes over memory (default: 2)
    pub iterations: u32,
    /// Degree of parallelism (default: 1)
    pub parallelism: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// One-way salted password hasher
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Build a hasher, rejecting cost parameters Argon2 does not accept
    pub fn new(config: &HasherConfig) -> AuthResult<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AuthError::Hashing(format!("invalid argon2 parameters: {}", e)))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password into a PHC-formatted digest
    pub fn hash(&self, plaintext: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let digest = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .to_string();

        Ok(digest)
    }

    /// Check a candidate password against a stored digest.
    ///
    /// The comparison is constant-time. A digest that cannot be parsed
    /// never matches.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let parsed = match PasswordHash::new(digest) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Rejecting malformed password digest: {}", e);
                return false;
            }
        };

        self.argon2()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }

    /// [`hash`](Self::hash) on the blocking thread pool
    pub async fn hash_blocking(&self, plaintext: &str) -> AuthResult<String> {
        let hasher = self.clone();
        let plaintext = plaintext.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AuthError::Internal(format!("hashing task failed: {}", e)))?
    }

    /// [`verify`](Self::verify) on the blocking thread pool
    pub async fn verify_blocking(&self, plaintext: &str, digest: &str) -> AuthResult<bool> {
        let hasher = self.clone();
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &digest))
            .await
            .map_err(|e| AuthError::Internal(format!("verification task failed: {}", e)))
    }
}
