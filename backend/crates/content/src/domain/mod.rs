//! Domain Layer

pub mod entities;
pub mod repository;
pub mod resource;
pub mod value_objects;

pub use entities::{NewPost, Post, PostChanges, SocialAccount, SocialAccountFields};
pub use repository::OwnedRepository;
pub use resource::{OwnedResource, ResourceId};
