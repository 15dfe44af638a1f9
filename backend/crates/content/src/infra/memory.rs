//! In-Memory Repository Implementation

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::UserId;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::repository::OwnedRepository;
use crate::domain::resource::{OwnedResource, ResourceId};
use crate::error::{ContentError, ContentResult};

/// Items keyed by id, each tagged with its insertion sequence
struct Items<E> {
    next_seq: u64,
    by_id: HashMap<Uuid, (u64, E)>,
}

/// Process-local store for one resource type
///
/// Lists are ordered by creation time, then by insertion order for items
/// created within the same microsecond.
pub struct MemoryOwnedRepository<E> {
    items: Arc<RwLock<Items<E>>>,
}

impl<E> MemoryOwnedRepository<E> {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Items {
                next_seq: 0,
                by_id: HashMap::new(),
            })),
        }
    }
}

impl<E> Default for MemoryOwnedRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impl: `derive(Clone)` would demand `E: Clone` on the handle.
impl<E> Clone for MemoryOwnedRepository<E> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<E: OwnedResource> OwnedRepository<E> for MemoryOwnedRepository<E> {
    async fn list(&self, owner: &UserId) -> ContentResult<Vec<E>> {
        let items = self.items.read().await;
        let mut owned: Vec<&(u64, E)> = items
            .by_id
            .values()
            .filter(|(_, item)| item.is_owned_by(owner))
            .collect();
        owned.sort_by_key(|(seq, item)| (item.created_at(), *seq));
        Ok(owned.into_iter().map(|(_, item)| item.clone()).collect())
    }

    async fn find(&self, owner: &UserId, id: &ResourceId<E>) -> ContentResult<Option<E>> {
        let items = self.items.read().await;
        Ok(items
            .by_id
            .get(id.as_uuid())
            .map(|(_, item)| item)
            .filter(|item| item.is_owned_by(owner))
            .cloned())
    }

    async fn insert(&self, resource: &E) -> ContentResult<()> {
        let mut items = self.items.write().await;
        let key = resource.id().into_uuid();

        if items.by_id.contains_key(&key) {
            return Err(ContentError::Internal(format!(
                "Duplicate {} id {}",
                E::KIND,
                key
            )));
        }

        let seq = items.next_seq;
        items.next_seq += 1;
        items.by_id.insert(key, (seq, resource.clone()));
        Ok(())
    }

    async fn update(&self, resource: &E) -> ContentResult<bool> {
        let mut items = self.items.write().await;
        let owner = resource.owner_id();

        match items.by_id.get_mut(resource.id().as_uuid()) {
            Some((_, stored)) if stored.is_owned_by(&owner) => {
                *stored = resource.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, owner: &UserId, id: &ResourceId<E>) -> ContentResult<bool> {
        let mut items = self.items.write().await;

        let owned = items
            .by_id
            .get(id.as_uuid())
            .is_some_and(|(_, item)| item.is_owned_by(owner));
        if owned {
            items.by_id.remove(id.as_uuid());
        }
        Ok(owned)
    }
}
