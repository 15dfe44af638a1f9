//! Sign In Use Case
//!
//! Exchanges email + password for a fresh identity token.

use std::sync::Arc;

use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user_id: UserId,
    pub token: String,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            config,
            tokens,
        }
    }

    /// Every way of getting the credentials wrong ends in `InvalidCredentials`
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_valid = user
            .password_hash
            .verify(raw_password, self.config.pepper())
            .await?;

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(user.user_id.into_uuid())
            .map_err(AuthError::TokenIssue)?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            user_id: user.user_id,
            token,
        })
    }
}
