//! Core data types for Packetary.
//!
//! Four layers, each depending only on the ones before it:
//! - Version strings with a total ordering
//! - Version ranges (operator + edge) and their intersection test
//! - Relations, i.e. OR-chains of named ranges
//! - Package and repository records

pub mod package;
pub mod range;
pub mod relation;
pub mod repository;
pub mod version;

// Re-export all public types
pub use package::{FileChecksum, Package};
pub use range::{Op, VersionRange};
pub use relation::{Iter, Relation};
pub use repository::{Repository, Section};
pub use version::{AsVersion, Version};
