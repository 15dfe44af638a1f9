//! User Password Value Object
//!
//! Domain wrapper around `platform::password`. Hashing and verification run
//! on the blocking pool, so both are `async`.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    self, ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

use crate::error::AuthResult;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation
    ///
    /// Rejects empty/whitespace-only and oversize input. Short passwords are
    /// accepted.
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "Password must be at most {} characters (got {})",
                max, actual
            ))
            .with_action("Please choose a shorter password"),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
                    .with_action("Please enter a password")
            }
        })?;

        Ok(Self(clear_text))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id PHC string for database storage
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password (consumes it)
    pub async fn from_raw(raw: RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        let hashed = password::hash_blocking(raw.0, pepper.map(<[u8]>::to_vec)).await?;
        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc_string).map(Self)
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash (consumes it)
    ///
    /// `pepper` must match the one used during hashing.
    pub async fn verify(&self, raw: RawPassword, pepper: Option<&[u8]>) -> AuthResult<bool> {
        let matches =
            password::verify_blocking(self.0.clone(), raw.0, pepper.map(<[u8]>::to_vec)).await?;
        Ok(matches)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(s: &str) -> RawPassword {
        RawPassword::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("pw123".to_string()).is_ok());
        assert!(RawPassword::new("".to_string()).is_err());
        assert!(RawPassword::new("    ".to_string()).is_err());

        let long_pass = "a".repeat(password::MAX_PASSWORD_LENGTH + 1);
        let err = RawPassword::new(long_pass).unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hashed = UserPassword::from_raw(raw("pw123"), None).await.unwrap();

        assert!(hashed.verify(raw("pw123"), None).await.unwrap());
        assert!(!hashed.verify(raw("pw1234"), None).await.unwrap());
    }

    #[tokio::test]
    async fn test_hash_with_pepper() {
        let pepper: &[u8] = b"app_secret_pepper";
        let hashed = UserPassword::from_raw(raw("pw123"), Some(pepper))
            .await
            .unwrap();

        assert!(hashed.verify(raw("pw123"), Some(pepper)).await.unwrap());
        assert!(!hashed.verify(raw("pw123"), None).await.unwrap());
    }

    #[tokio::test]
    async fn test_phc_string_roundtrip() {
        let hashed = UserPassword::from_raw(raw("pw123"), None).await.unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(raw("pw123"), None).await.unwrap());
    }

    #[test]
    fn test_debug_is_redacted() {
        assert!(!format!("{:?}", raw("pw123")).contains("pw123"));
    }
}
