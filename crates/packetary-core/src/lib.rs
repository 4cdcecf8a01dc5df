//! # packetary-core
//!
//! Core value types shared across all Packetary crates.
//!
//! This crate provides:
//! - Version parsing and Debian-style epoch/version/release ordering
//! - VersionRange constraints with an exact has-intersection test
//! - Relation OR-chains ("a (>= 1) | b | c")
//! - Package and Repository records for use as map keys and in sorted sets
//! - PacketaryError enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core value types (Version, VersionRange, Relation, etc.)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{PacketaryError, PacketaryResult};
pub use types::{
    AsVersion, FileChecksum, Op, Package, Relation, Repository, Section, Version, VersionRange,
};
