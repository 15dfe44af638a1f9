//! Password Hashing and Verification
//!
//! One-way, salted credential storage with:
//! - Argon2id hashing with a fixed work factor (memory-hard)
//! - Zeroization of clear text on drop
//! - Constant-time comparison on verify
//! - Optional application-wide pepper
//!
//! Argon2 is CPU-bound; the async helpers run it on the blocking pool so a
//! signup or signin never stalls the request reactor.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants
// ============================================================================

/// Argon2id memory cost in KiB (OWASP: m=19456)
pub const ARGON2_MEMORY_KIB: u32 = 19_456;

/// Argon2id iteration count (OWASP: t=2)
pub const ARGON2_ITERATIONS: u32 = 2;

/// Argon2id lanes (OWASP: p=1)
pub const ARGON2_PARALLELISM: u32 = 1;

/// Maximum password length in characters
pub const MAX_PASSWORD_LENGTH: usize = 256;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password is empty or contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,
}

/// Password hashing/verification errors
///
/// None of these carry the clear text.
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash is not a PHC string
    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// Verification could not run (not a mismatch)
    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordHashError> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        None,
    )
    .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// - Does not implement `Clone`
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password
    ///
    /// Unicode is NFKC-normalized first so that visually identical input
    /// hashes identically. Rejects empty/whitespace-only and oversize input;
    /// there is deliberately no minimum length.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        Ok(Self(normalized))
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash the password using Argon2id
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `HashedPassword`
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let password_bytes = self.peppered(pepper);

        // 128-bit random salt
        let salt = SaltString::generate(&mut OsRng);

        let hash = hasher()?
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("pw123".to_string()).unwrap();
/// let hashed = password.hash(None).unwrap();
/// assert!(hashed.verify(&password, None).unwrap());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// `Ok(false)` is a mismatch. `Err` means the check could not be made.
    /// Argon2 compares the digests in constant time.
    pub fn verify(
        &self,
        password: &ClearTextPassword,
        pepper: Option<&[u8]>,
    ) -> Result<bool, PasswordHashError> {
        let parsed_hash =
            PasswordHash::new(&self.hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        // Parameters come from the PHC string, not from `hasher()`.
        match Argon2::default().verify_password(&password.peppered(pepper), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordHashError::VerificationFailed(e.to_string())),
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Async helpers
// ============================================================================

/// Hash on the blocking thread pool
pub async fn hash_blocking(
    password: ClearTextPassword,
    pepper: Option<Vec<u8>>,
) -> Result<HashedPassword, PasswordHashError> {
    tokio::task::spawn_blocking(move || password.hash(pepper.as_deref()))
        .await
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
}

/// Verify on the blocking thread pool
pub async fn verify_blocking(
    hashed: HashedPassword,
    password: ClearTextPassword,
    pepper: Option<Vec<u8>>,
) -> Result<bool, PasswordHashError> {
    tokio::task::spawn_blocking(move || hashed.verify(&password, pepper.as_deref()))
        .await
        .map_err(|e| PasswordHashError::VerificationFailed(e.to_string()))?
}

// ============================================================================
// Tests
// ============================================================================
