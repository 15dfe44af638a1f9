//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - Postgres and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, routers, gateway middleware
//!
//! ## Features
//! - Sign up / sign in with email + password, answered with a bearer token
//! - `/users` CRUD and the token holder's dashboard
//! - The gateway middleware other crates put in front of owned resources
//!
//! ## Security Model
//! - Passwords hashed with Argon2id on the blocking pool, never serialized
//! - Stateless HS256 tokens, 24h lifetime, no revocation
//! - Unknown email and wrong password are indistinguishable to the client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::{
    AuthAppState, AuthGateway, AuthenticatedUser, auth_router, require_bearer_token, users_router,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
