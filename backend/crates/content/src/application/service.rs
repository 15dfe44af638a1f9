//! Owned Resource Use Cases
//!
//! One generic service backs every owned resource type. The owner always
//! comes from the authenticated identity.

use std::marker::PhantomData;
use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::OwnedRepository;
use crate::domain::resource::{OwnedResource, ResourceId};
use crate::error::{ContentError, ContentResult};

pub struct OwnedResourceService<E, R>
where
    E: OwnedResource,
    R: OwnedRepository<E>,
{
    repo: Arc<R>,
    not_found: &'static str,
    _resource: PhantomData<fn() -> E>,
}

impl<E, R> OwnedResourceService<E, R>
where
    E: OwnedResource,
    R: OwnedRepository<E>,
{
    /// `not_found` is the message returned when id and owner match nothing
    pub fn new(repo: Arc<R>, not_found: &'static str) -> Self {
        Self {
            repo,
            not_found,
            _resource: PhantomData,
        }
    }

    pub async fn list(&self, owner: &UserId) -> ContentResult<Vec<E>> {
        self.repo.list(owner).await
    }

    /// Another user's resource is indistinguishable from a missing one
    pub async fn get(&self, owner: &UserId, id: &ResourceId<E>) -> ContentResult<E> {
        self.repo
            .find(owner, id)
            .await?
            .ok_or(ContentError::NotFound(self.not_found))
    }

    pub async fn create(&self, owner: &UserId, fields: E::Fields) -> ContentResult<E> {
        let resource = E::create(*owner, fields);
        self.repo.insert(&resource).await?;

        tracing::info!(
            kind = E::KIND,
            id = %resource.id(),
            owner = %owner,
            "Resource created"
        );

        Ok(resource)
    }

    /// Replace the supplied fields. Concurrent updates are last-write-wins.
    pub async fn update(
        &self,
        owner: &UserId,
        id: &ResourceId<E>,
        changes: E::Changes,
    ) -> ContentResult<E> {
        let mut resource = self.get(owner, id).await?;
        resource.apply(changes);

        // Deleted between the read and the write
        if !self.repo.update(&resource).await? {
            return Err(ContentError::NotFound(self.not_found));
        }

        tracing::info!(kind = E::KIND, id = %id, owner = %owner, "Resource updated");

        Ok(resource)
    }

    pub async fn delete(&self, owner: &UserId, id: &ResourceId<E>) -> ContentResult<()> {
        if !self.repo.delete(owner, id).await? {
            return Err(ContentError::NotFound(self.not_found));
        }

        tracing::info!(kind = E::KIND, id = %id, owner = %owner, "Resource deleted");

        Ok(())
    }
}
