//! Password hashing and verification collaborator.

use crate::errors::{DomainError, DomainResult};

/// Verifies and hashes login credentials
///
/// Trait seam so the orchestrator never depends on a concrete hashing
/// scheme; tests substitute a cheap implementation.
pub trait PasswordVerifier: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash(&self, plain: &str) -> DomainResult<String>;

    /// Check a plaintext password against a stored hash
    ///
    /// Malformed stored hashes verify as `false`, never as an error: a
    /// login attempt must not learn anything about the stored credential.
    fn verify(&self, plain: &str, hash: &str) -> bool;
}

/// Bcrypt-backed password verifier
#[derive(Debug, Clone)]
pub struct BcryptPasswordVerifier {
    cost: u32,
}

impl BcryptPasswordVerifier {
    /// Create a verifier with an explicit bcrypt cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordVerifier {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordVerifier for BcryptPasswordVerifier {
    fn hash(&self, plain: &str) -> DomainResult<String> {
        bcrypt::hash(plain, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }

    fn verify(&self, plain: &str, hash: &str) -> bool {
        bcrypt::verify(plain, hash).unwrap_or(false)
    }
}
