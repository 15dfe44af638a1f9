//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::user::User;

// ============================================================================
// Requests
// ============================================================================

/// Account attributes, used by sign-up and by `/users` create and replace
#[derive(Clone, Deserialize)]
pub struct UserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for UserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Sign in request
#[derive(Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Successful sign-up / sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub auth: bool,
    pub token: String,
}

impl TokenResponse {
    pub fn new(token: String) -> Self {
        Self { auth: true, token }
    }
}

/// Public view of a user; the password hash has no field here
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.into_uuid(),
            username: user.user_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_is_camel_case() {
        let now = Utc::now();
        let response = UserResponse {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "a@x.io".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_request_debug_hides_password() {
        let req: UserRequest = serde_json::from_str(
            r#"{"username":"alice","email":"a@x.io","password":"pw123"}"#,
        )
        .unwrap();
        assert!(!format!("{:?}", req).contains("pw123"));
    }
}
