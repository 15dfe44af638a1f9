//! Identity Tokens
//!
//! Stateless, signed, time-limited credentials (HS256 JWT).
//!
//! A token carries the subject id and an expiry. The signing key is fixed
//! when the [`TokenService`] is built at startup; the service is then shared
//! read-only (`Arc<TokenService>`). There is no server-side revocation: a
//! token stays valid until it expires.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Token lifetime used when none is configured (24 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Minimum accepted HS256 key length in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Registered claims carried by every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
}

/// Why a token was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not a JWT, wrong algorithm, or claims that do not parse
    #[error("Malformed token")]
    Malformed,

    /// Signature does not match (tampered, or signed with another key)
    #[error("Token signature mismatch")]
    BadSignature,

    /// `exp` is in the past
    #[error("Token expired")]
    Expired,

    /// Signing failed while issuing
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Issues and verifies identity tokens with one process-wide key
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Build the service from the signing secret and token lifetime
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a token for `subject`, valid for the configured TTL from now
    pub fn issue(&self, subject: Uuid) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if it had been issued at `issued_at`
    pub fn issue_at(&self, subject: Uuid, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let ttl_secs = i64::try_from(self.ttl.as_secs())
            .map_err(|_| TokenError::Signing("TTL out of range".to_string()))?;

        let iat = issued_at.timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp: iat + ttl_secs,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return its subject
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                JwtErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Malformed)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("key", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn service() -> TokenService {
        TokenService::new(&[7u8; 32], DEFAULT_TOKEN_TTL)
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service();
        let subject = Uuid::new_v4();

        let token = tokens.issue(subject).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), subject);
    }

    #[test]
    fn test_expiry_is_ttl_after_issue() {
        let tokens = service();
        let token = tokens.issue(Uuid::new_v4()).unwrap();

        let payload = token.split('.').nth(1).unwrap();
        let claims: Claims =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service();
        let issued_at = Utc::now() - chrono::Duration::hours(25);

        let token = tokens.issue_at(Uuid::new_v4(), issued_at).unwrap();
        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_from_other_key_is_rejected() {
        let ours = service();
        let theirs = TokenService::new(&[8u8; 32], DEFAULT_TOKEN_TTL);

        let token = theirs.issue(Uuid::new_v4()).unwrap();
        assert_eq!(ours.verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let tokens = service();
        let token = tokens.issue(Uuid::new_v4()).unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let forged = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        parts[1] = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());

        assert_eq!(tokens.verify(&parts.join(".")), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let tokens = service();
        assert_eq!(tokens.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(tokens.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_non_uuid_subject_is_malformed() {
        let secret = [7u8; 32];
        let claims = Claims {
            sub: "alice".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&secret),
        )
        .unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_debug_hides_key() {
        let debug_output = format!("{:?}", service());
        assert!(debug_output.contains("REDACTED"));
    }
}
