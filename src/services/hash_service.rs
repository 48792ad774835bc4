//! Password hashing service.
//!
//! A trait seam over `domain::Password` so user use cases can be tested
//! without paying for Argon2 on every call.

use crate::domain::Password;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait HashService: Send + Sync {
    /// Hash a plaintext password with a random salt.
    fn hash(&self, plain_text: &str) -> AppResult<String>;
}

/// Argon2 implementation of HashService
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl HashService for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> AppResult<String> {
        Ok(Password::hash(plain_text)?.into_string())
    }
}
