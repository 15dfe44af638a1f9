//! Content Backend Module
//!
//! Resources a signed-in user owns: scheduled posts and linked social media
//! accounts.
//!
//! - `domain/` - Entities, the [`OwnedResource`] abstraction, repository trait
//! - `application/` - The generic owner-scoped service
//! - `infra/` - PostgreSQL and in-memory stores
//! - `presentation/` - DTOs, generic handlers, routers
//!
//! Every read and write is filtered by the caller's id as established by
//! `auth`'s gateway. Another user's resource is reported as not found.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use domain::{OwnedRepository, OwnedResource, Post, SocialAccount};
pub use error::{ContentError, ContentResult};
pub use infra::{MemoryOwnedRepository, PgOwnedRepository};
pub use presentation::{ResourceApi, content_router, resource_router};
