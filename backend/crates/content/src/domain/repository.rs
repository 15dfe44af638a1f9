//! Repository Traits
//!
//! Every query is scoped by owner. There is no way to read or write a
//! resource through this interface without naming the user it belongs to.

use kernel::id::UserId;

use crate::domain::resource::{OwnedResource, ResourceId};
use crate::error::ContentResult;

/// Owner-scoped store for one resource type
#[trait_variant::make(OwnedRepository: Send)]
pub trait LocalOwnedRepository<E: OwnedResource> {
    /// All of `owner`'s resources, oldest first
    async fn list(&self, owner: &UserId) -> ContentResult<Vec<E>>;

    /// Match on both id and owner
    async fn find(&self, owner: &UserId, id: &ResourceId<E>) -> ContentResult<Option<E>>;

    async fn insert(&self, resource: &E) -> ContentResult<()>;

    /// Overwrite the stored row matching the resource's id and owner.
    /// Returns `false` if there is none.
    async fn update(&self, resource: &E) -> ContentResult<bool>;

    /// Returns `false` if nothing matched id and owner
    async fn delete(&self, owner: &UserId, id: &ResourceId<E>) -> ContentResult<bool>;
}
