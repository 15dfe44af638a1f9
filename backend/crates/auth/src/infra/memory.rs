//! In-Memory Repository Implementation
//!
//! Process-local credential store used when no database is configured and
//! by the integration tests. Same uniqueness rules as the Postgres store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, email::Email};
use crate::error::{AuthError, AuthResult};

/// In-memory credential store
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// First attribute of `user` already held by another account
fn duplicate_of(users: &HashMap<Uuid, User>, user: &User) -> Option<&'static str> {
    let others = users.values().filter(|u| u.user_id != user.user_id);

    for other in others {
        if other.user_name == user.user_name {
            return Some("username");
        }
        if other.email == user.email {
            return Some("email");
        }
    }
    None
}

impl UserRepository for MemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if users.contains_key(user.user_id.as_uuid()) {
            return Err(AuthError::Conflict("user"));
        }
        if let Some(field) = duplicate_of(&users, user) {
            return Err(AuthError::Conflict(field));
        }

        users.insert(user.user_id.into_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| (u.created_at, u.user_id.into_uuid()));
        Ok(users)
    }

    async fn update(&self, user: &User) -> AuthResult<bool> {
        let mut users = self.users.write().await;

        if !users.contains_key(user.user_id.as_uuid()) {
            return Ok(false);
        }
        if let Some(field) = duplicate_of(&users, user) {
            return Err(AuthError::Conflict(field));
        }

        users.insert(user.user_id.into_uuid(), user.clone());
        Ok(true)
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        Ok(self.users.write().await.remove(user_id.as_uuid()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        user_name::UserName, user_password::{RawPassword, UserPassword},
    };

    async fn user(name: &str, email: &str) -> User {
        let raw = RawPassword::new("pw123".to_string()).unwrap();
        User::new(
            UserName::new(name).unwrap(),
            Email::new(email).unwrap(),
            UserPassword::from_raw(raw, None).await.unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MemoryAuthRepository::new();
        let alice = user("alice", "a@x.io").await;
        repo.create(&alice).await.unwrap();

        let by_id = repo.find_by_id(&alice.user_id).await.unwrap().unwrap();
        assert_eq!(by_id.user_name, alice.user_name);

        let by_email = repo
            .find_by_email(&Email::new("A@X.IO").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.user_id, alice.user_id);
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email() {
        let repo = MemoryAuthRepository::new();
        repo.create(&user("alice", "a@x.io").await).await.unwrap();

        let same_name = repo.create(&user("alice", "other@x.io").await).await;
        assert!(matches!(same_name, Err(AuthError::Conflict("username"))));

        let same_email = repo.create(&user("bob", "a@x.io").await).await;
        assert!(matches!(same_email, Err(AuthError::Conflict("email"))));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = MemoryAuthRepository::new();
        let ghost = user("ghost", "g@x.io").await;

        assert!(!repo.update(&ghost).await.unwrap());
        assert!(!repo.delete(&ghost.user_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_may_keep_own_email() {
        let repo = MemoryAuthRepository::new();
        let mut alice = user("alice", "a@x.io").await;
        repo.create(&alice).await.unwrap();

        alice.user_name = UserName::new("alice2").unwrap();
        assert!(repo.update(&alice).await.unwrap());
    }
}
