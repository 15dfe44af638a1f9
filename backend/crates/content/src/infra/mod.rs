//! Infrastructure Layer
//!
//! Owner-scoped stores: PostgreSQL for deployments, in-memory for tests and
//! database-less development.

pub mod memory;
pub mod postgres;

pub use memory::MemoryOwnedRepository;
pub use postgres::{PgOwnedRepository, PgSchema};
