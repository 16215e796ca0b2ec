//! Password Hashing and Verification
//!
//! Argon2id password handling with:
//! - Zeroization of submitted plaintext
//! - Constant-time comparison (inside Argon2 verification)
//! - Unicode NFKC normalization before hashing/verification
//!
//! Password *policy* (length, breach checks) lives with registration, which
//! this backend does not own. Login only needs to verify what was submitted
//! against the stored PHC hash.

use std::fmt;

use argon2::{Argon2, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Submitted Password (Zeroized on drop)
// ============================================================================

/// A submitted plaintext password, erased from memory on drop.
///
/// Does not implement `Clone`; Debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SubmittedPassword(String);

impl SubmittedPassword {
    /// Wrap a submitted password, applying Unicode NFKC normalization.
    ///
    /// Normalization must match what was applied when the stored hash was
    /// created, otherwise visually identical passwords fail verification.
    pub fn new(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    /// Whether the submitted value is empty after normalization
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SubmittedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SubmittedPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format, as read from or written to the store.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        // Validate it's a valid PHC string
        argon2::PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Hash a submitted password with a fresh random salt.
    ///
    /// Used by test fixtures and the dummy hash; account creation is owned
    /// elsewhere.
    pub fn generate(password: &SubmittedPassword) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a submitted password against this hash.
    ///
    /// Argon2 uses constant-time comparison internally. This is CPU-bound;
    /// callers on an async runtime should run it on the blocking pool.
    pub fn verify(&self, password: &SubmittedPassword) -> bool {
        let parsed_hash = match argon2::PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
