//! Password hashing and verification
//!
//! Uses Argon2id for secure password hashing (OWASP recommended). The work
//! factor comes from [`HashingConfig`]; verification always uses the
//! parameters embedded in the stored PHC string, so tuning the work factor
//! never invalidates existing hashes.

use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::config::HashingConfig;

/// Password hashing errors
///
/// A wrong password is *not* an error; `verify` returns `Ok(false)` for it.
#[derive(Debug, thiserror::Error)]
pub enum HashingError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Invalid password hash format: {0}")]
    MalformedHash(String),

    #[error("Password verification failed: {0}")]
    Verify(String),
}

/// Password service for dependency injection
#[derive(Debug, Clone)]
pub struct PasswordService {
    params: Params,
}

impl PasswordService {
    /// Create a password service with the given work factor
    ///
    /// # Errors
    /// Returns `HashingError::InvalidParams` if Argon2 rejects the parameters
    pub fn new(config: &HashingConfig) -> Result<Self, HashingError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| HashingError::InvalidParams(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a fresh random salt
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, HashingError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashingError::Hash(e.to_string()))
    }

    /// Verify a password against a stored hash
    ///
    /// # Errors
    /// Returns an error only if the stored hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, HashingError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| HashingError::MalformedHash(e.to_string()))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashingError::Verify(e.to_string())),
        }
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}
