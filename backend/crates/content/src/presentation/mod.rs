//! Presentation Layer
//!
//! HTTP handlers, DTOs, and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use dto::ResourceApi;
pub use handlers::ResourceState;
pub use router::{content_router, resource_router};
