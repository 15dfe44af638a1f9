//! Domain Value Objects

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};

/// Required free text: must contain something other than whitespace.
/// The value is kept exactly as supplied.
pub fn required_text(field: &'static str, value: String) -> AppResult<String> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request(format!("{} cannot be empty", field)));
    }
    Ok(value)
}

/// Third-party credential for a linked social account
///
/// Opaque to this service. `Debug` and `Display` never show it.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: String) -> AppResult<Self> {
        required_text("Access token", raw).map(Self)
    }

    /// Create from database value
    pub fn from_db(raw: String) -> Self {
        Self(raw)
    }

    /// The token itself, for storage and for the owner's own responses
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
