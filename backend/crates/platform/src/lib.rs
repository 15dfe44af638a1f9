//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, fixed work factor)
//! - Signed identity tokens (HS256 JWT with a fixed TTL)
//! - Bearer credential extraction from request headers
//! - Random secret generation and Base64 helpers

pub mod bearer;
pub mod crypto;
pub mod password;
pub mod token;
