//! Password hashing and verification.
//!
//! Hashes are Argon2id PHC strings, so the salt and the cost parameters travel
//! inside the stored value and verification never needs outside configuration.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HashError {
    #[error("secret must not be empty")]
    InvalidSecret,

    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("hashing failed: {0}")]
    Hashing(String),
}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashParams {
    /// Argon2id RFC 9106 second recommended option
    fn default() -> Self {
        Self {
            memory_kib: 19456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// An encoded password hash as stored next to the user record.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedSecret(String);

impl HashedSecret {
    pub fn from_stored(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// Hashes are not secrets, but they are still kept out of logs.
impl std::fmt::Debug for HashedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HashedSecret(..)")
    }
}

#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    pub fn new(params: HashParams) -> Result<Self, HashError> {
        let params = Params::new(params.memory_kib, params.iterations, params.parallelism, None)
            .map_err(|e| HashError::InvalidParams(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a secret with a freshly generated salt.
    pub fn hash(&self, secret: &str) -> Result<HashedSecret, HashError> {
        if secret.is_empty() {
            return Err(HashError::InvalidSecret);
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = self.argon2();
        let hash = argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| HashError::Hashing(e.to_string()))?;

        Ok(HashedSecret(hash.to_string()))
    }

    /// Check a secret against a stored hash.
    ///
    /// Uses the parameters embedded in `stored`, not the ones this hasher was
    /// built with. A stored value that does not parse never verifies.
    pub fn verify(&self, secret: &str, stored: &HashedSecret) -> bool {
        let parsed = match PasswordHash::new(stored.as_str()) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!("Stored password hash is unreadable: {}", e);
                return false;
            }
        };

        self.argon2().verify_password(secret.as_bytes(), &parsed).is_ok()
    }

    /// `hash` on the blocking pool, keeping the executor free while Argon2 runs.
    pub async fn hash_blocking(&self, secret: String) -> Result<HashedSecret, HashError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| HashError::Hashing(e.to_string()))?
    }

    /// `verify` on the blocking pool. A task that fails to complete counts as a mismatch.
    pub async fn verify_blocking(&self, secret: String, stored: HashedSecret) -> bool {
        let hasher = self.clone();
        match tokio::task::spawn_blocking(move || hasher.verify(&secret, &stored)).await {
            Ok(verified) => verified,
            Err(e) => {
                tracing::error!("Password verification task failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn cheap_params() -> HashParams {
    HashParams {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}
