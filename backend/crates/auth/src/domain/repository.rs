//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure
//! layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{UserId, email::Email};
use crate::error::AuthResult;

/// Credential store
///
/// Implementations enforce uniqueness of user name and email on `create`
/// and `update`, failing with `AuthError::Conflict`.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// All users, oldest first
    async fn list(&self) -> AuthResult<Vec<User>>;

    /// Overwrite a stored user. Returns `false` if it no longer exists.
    async fn update(&self, user: &User) -> AuthResult<bool>;

    /// Hard delete. Returns `false` if nothing was deleted.
    async fn delete(&self, user_id: &UserId) -> AuthResult<bool>;
}
