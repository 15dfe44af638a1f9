//! Presentation Layer
//!
//! HTTP handlers, DTOs, routers, and the auth gateway middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AuthGateway, AuthenticatedUser, require_bearer_token};
pub use router::{auth_router, users_router};
