//! # civic-core
//!
//! Core types shared across all Civic crates.
//!
//! - Issue and comment entities plus the create payload
//! - Closed enums for status, priority, status filter, sort mode, role and action,
//!   each with an exhaustive rank or string mapping
//! - The authenticated identity passed from `civic-auth` to the server
//! - ID prefixes and timestamp parsing
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod responses;
pub mod timestamps;
