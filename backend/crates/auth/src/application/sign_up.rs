//! Sign Up Use Case
//!
//! Creates a new user account and issues its first identity token.

use std::sync::Arc;

use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId, email::Email, user_name::UserName, user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub user_id: UserId,
    pub token: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<U> SignUpUseCase<U>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Validate everything before paying for a hash
        let user_name = UserName::new(&input.user_name)?;
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        let password_hash = UserPassword::from_raw(raw_password, self.config.pepper()).await?;

        let user = User::new(user_name, email, password_hash);

        // Uniqueness is decided by the store
        self.user_repo.create(&user).await?;

        let token = self
            .tokens
            .issue(user.user_id.into_uuid())
            .map_err(AuthError::TokenIssue)?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
            token,
        })
    }
}
