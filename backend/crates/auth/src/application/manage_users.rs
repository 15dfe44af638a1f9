//! User Management Use Case
//!
//! Listing, lookup, replacement and deletion of accounts. Creation goes
//! through [`SignUpUseCase`](crate::application::SignUpUseCase).

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId, email::Email, user_name::UserName, user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Replacement attributes for an existing user
pub struct UpdateUserInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// User management use case
pub struct ManageUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ManageUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn list(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list().await
    }

    pub async fn get(&self, user_id: &UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Replace user name, email and password (re-hashed)
    pub async fn update(&self, user_id: &UserId, input: UpdateUserInput) -> AuthResult<User> {
        let user_name = UserName::new(&input.user_name)?;
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        let mut user = self.get(user_id).await?;

        let password_hash = UserPassword::from_raw(raw_password, self.config.pepper()).await?;
        user.replace_profile(user_name, email, password_hash);

        // Deleted between the read and the write
        if !self.user_repo.update(&user).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user.user_id, "User updated");

        Ok(user)
    }

    /// Hard delete; resources the user owns are left in place
    pub async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        if !self.user_repo.delete(user_id).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "User deleted");

        Ok(())
    }
}
