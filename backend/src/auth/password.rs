//! One-way password hashing with bcrypt.
//!
//! Every call to [`PasswordHasher::hash`] draws a fresh random salt, which is
//! embedded in the returned string alongside the cost, so the same plaintext
//! never hashes to the same value twice.

use crate::errors::{ServiceError, ServiceResult};
use anyhow::Context;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Work factor used for every stored password.
    pub const DEFAULT_COST: u32 = 10;

    /// Creates a hasher with an explicit work factor.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Function to hash a password before storing in database
    ///
    /// bcrypt only reads the first 72 bytes of the password. Longer inputs are
    /// accepted and truncated, so passwords sharing a 72-byte prefix verify
    /// against each other's hash.
    ///
    /// # Errors
    /// Returns `ServiceError::ServerError` if the hashing library fails; the
    /// shape of the input is never a reason to fail.
    pub fn hash(&self, password: &str) -> ServiceResult<String> {
        bcrypt::hash(password, self.cost)
            .context("password hashing failed")
            .map_err(ServiceError::from)
    }

    /// Function to verify a password against the stored hash
    ///
    /// # Returns
    /// `true` if password matches hash, `false` otherwise
    ///
    /// # Errors
    /// Returns `ServiceError::ServerError` if `hash` is not a well-formed
    /// bcrypt hash.
    pub fn verify(&self, password: &str, hash: &str) -> ServiceResult<bool> {
        bcrypt::verify(password, hash)
            .context("password verification failed")
            .map_err(ServiceError::from)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::with_cost(Self::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        // bcrypt's minimum cost
        PasswordHasher::with_cost(4)
    }

    #[test]
    fn test_hash_then_verify() {
        let hasher = fast_hasher();
        let hashed = hasher.hash("pw").unwrap();

        assert!(hasher.verify("pw", &hashed).unwrap());
        assert!(!hasher.verify("pW", &hashed).unwrap());
        assert!(!hasher.verify("", &hashed).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = fast_hasher();
        let first = hasher.hash("pw").unwrap();
        let second = hasher.hash("pw").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("pw", &first).unwrap());
        assert!(hasher.verify("pw", &second).unwrap());
    }

    #[test]
    fn test_default_cost_is_embedded() {
        let hashed = PasswordHasher::default().hash("pw").unwrap();
        assert!(hashed.starts_with("$2b$10$"));
    }

    #[test]
    fn test_only_first_72_bytes_count() {
        let hasher = fast_hasher();
        let prefix = "p".repeat(72);
        let hashed = hasher.hash(&format!("{}a", prefix)).unwrap();

        assert!(hasher.verify(&format!("{}b", prefix), &hashed).unwrap());
        assert!(!hasher.verify(&"p".repeat(71), &hashed).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let result = fast_hasher().verify("pw", "not-a-bcrypt-hash");
        assert!(matches!(result, Err(ServiceError::ServerError { .. })));
    }
}
