//! Password hashing utilities using SHA-256

use sha2::{Digest, Sha256};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password into a 64-character lowercase hex digest
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a stored digest
    fn verify(&self, password: &str, stored_digest: &str) -> bool;
}

/// SHA-256 password hasher producing hex digests
#[derive(Debug, Clone, Default)]
pub struct Sha256Hasher;

impl Sha256Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Sha256Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        if password.is_empty() {
            return Err(DomainError::validation("Password cannot be empty"));
        }

        let digest = Sha256::digest(password.as_bytes());

        Ok(hex::encode(digest))
    }

    fn verify(&self, password: &str, stored_digest: &str) -> bool {
        if password.is_empty() || stored_digest.is_empty() {
            return false;
        }

        match self.hash(password) {
            Ok(digest) => digest.eq_ignore_ascii_case(stored_digest),
            Err(_) => false,
        }
    }
}
