//! User Name Value Object
//!
//! The public handle shown on the dashboard. Any non-empty text is accepted
//! once NFKC-normalized and trimmed; uniqueness is exact (case-sensitive)
//! and enforced by the credential store.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(AppError::bad_request("Username cannot be empty")
                .with_action("Please enter a username"));
        }

        let char_count = trimmed.chars().count();
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {} characters (got {})",
                USER_NAME_MAX_LENGTH, char_count
            )));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(AppError::bad_request("Username contains invalid characters"));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_trimmed() {
        let name = UserName::new("  alice ").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_user_name_keeps_case() {
        assert_ne!(UserName::new("Alice").unwrap(), UserName::new("alice").unwrap());
    }

    #[test]
    fn test_user_name_empty() {
        assert!(UserName::new("").is_err());
        assert!(UserName::new(" \t ").is_err());
    }

    #[test]
    fn test_user_name_too_long() {
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_user_name_nfkc() {
        // Fullwidth letters fold to ASCII
        let name = UserName::new("ａｌｉｃｅ").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_user_name_control_chars() {
        assert!(UserName::new("ali\u{0007}ce").is_err());
    }
}
