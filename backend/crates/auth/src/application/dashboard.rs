//! Dashboard Use Case
//!
//! Profile of the user a verified token names.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

pub struct DashboardUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DashboardUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// The token can outlive the account; that case is `UserNotFound`.
    pub async fn execute(&self, user_id: &UserId) -> AuthResult<User> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::debug!(user_id = %user.user_id, "Dashboard viewed");

        Ok(user)
    }
}
