//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::crypto::random_secret;
use platform::token::{DEFAULT_TOKEN_TTL, MIN_SECRET_LEN, TokenService};

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing key for identity tokens (at least 32 bytes)
    pub token_secret: Vec<u8>,
    /// Token lifetime (24 hours)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: vec![0u8; MIN_SECRET_LEN],
            token_ttl: DEFAULT_TOKEN_TTL,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: random_secret().to_vec(),
            ..Default::default()
        }
    }

    /// Create config for development
    ///
    /// Tokens do not survive a restart.
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Whether the signing key is long enough for HS256
    pub fn has_strong_secret(&self) -> bool {
        self.token_secret.len() >= MIN_SECRET_LEN
    }

    /// Build the token service for this configuration
    pub fn token_service(&self) -> TokenService {
        TokenService::new(&self.token_secret, self.token_ttl)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_one_day() {
        assert_eq!(AuthConfig::default().token_ttl.as_secs(), 86_400);
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_ne!(a.token_secret, b.token_secret);
        assert!(a.has_strong_secret());
    }

    #[test]
    fn test_short_secret_is_weak() {
        let config = AuthConfig {
            token_secret: b"short".to_vec(),
            ..Default::default()
        };
        assert!(!config.has_strong_secret());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AuthConfig::with_random_secret()
        };
        let debug_output = format!("{:?}", config);
        // b"pep"
        assert!(!debug_output.contains("112, 101, 112"));
        assert!(debug_output.contains("REDACTED"));
    }
}
