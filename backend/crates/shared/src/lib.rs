//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every other crate agrees on:
//! - Common error types and result aliases
//! - Typed identifiers for users and the resources they own
//! - Store-precision timestamps
//!
//! Only things with the same meaning in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod time;
