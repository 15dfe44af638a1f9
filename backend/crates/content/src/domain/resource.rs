//! Owned Resource Abstraction
//!
//! Everything a user creates under their account implements
//! [`OwnedResource`]. The owner is fixed at creation from the authenticated
//! identity and never changes afterwards.

use chrono::{DateTime, Utc};
use kernel::id::{Id, UserId};

/// Identifier type of resource `E`
pub type ResourceId<E> = Id<<E as OwnedResource>::Marker>;

pub trait OwnedResource: Clone + Send + Sync + 'static {
    /// Id marker (`kernel::id::markers::*`)
    type Marker: 'static;

    /// Validated attributes for a new resource
    type Fields: Send + 'static;

    /// Validated replacement attributes
    type Changes: Send + 'static;

    /// Human-readable kind, used in logs
    const KIND: &'static str;

    /// Build a fresh resource owned by `owner`
    fn create(owner: UserId, fields: Self::Fields) -> Self;

    /// Apply changes and bump `updated_at`; id and owner are untouched
    fn apply(&mut self, changes: Self::Changes);

    fn id(&self) -> ResourceId<Self>;

    fn owner_id(&self) -> UserId;

    fn created_at(&self) -> DateTime<Utc>;

    /// Whether `user` owns this resource
    fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner_id() == *user
    }
}
