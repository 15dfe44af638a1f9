//! User Entity
//!
//! A registered account: public profile plus the stored password hash.

use chrono::{DateTime, Utc};
use kernel::time::now;

use crate::domain::value_object::{
    UserId, email::Email, user_name::UserName, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, shown on the dashboard
    pub user_name: UserName,
    /// Unique, used to sign in
    pub email: Email,
    /// Argon2id hash; never leaves the server
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(user_name: UserName, email: Email, password_hash: UserPassword) -> Self {
        let timestamp = now();

        Self {
            user_id: UserId::new(),
            user_name,
            email,
            password_hash,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Replace every mutable attribute at once
    pub fn replace_profile(
        &mut self,
        user_name: UserName,
        email: Email,
        password_hash: UserPassword,
    ) {
        self.user_name = user_name;
        self.email = email;
        self.password_hash = password_hash;
        self.updated_at = now();
    }
}
