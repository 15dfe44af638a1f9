//! Application Layer
//!
//! Use cases.

pub mod service;

pub use service::OwnedResourceService;
