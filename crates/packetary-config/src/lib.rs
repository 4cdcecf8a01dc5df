//! Mirror configuration parsing for Packetary
//!
//! This crate turns mirror configuration documents (TOML or JSON) into the
//! value objects of `packetary-core`: repositories, explicitly listed
//! packages and the requirement OR-chains that drive a mirror. Documents
//! are handed over as text; reading them from disk is the caller's job.

pub mod json;
pub mod merge;
pub mod mirror;
pub mod toml;

// Re-export main types
pub use crate::json::{parse_mirror_json, serialize_mirror_json};
pub use crate::merge::ConfigLayering;
pub use crate::mirror::{validate_config, MirrorConfig, PackageEntry, RequirementSpec};
pub use crate::toml::{parse_mirror_toml, serialize_mirror_toml};

use packetary_core::error::PacketaryResult;

/// Result type for configuration operations
pub type ConfigResult<T> = PacketaryResult<T>;

/// Supported configuration document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Guess the format from a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Parse and validate a document in this format
    pub fn parse(&self, content: &str) -> ConfigResult<MirrorConfig> {
        match self {
            ConfigFormat::Toml => parse_mirror_toml(content),
            ConfigFormat::Json => parse_mirror_json(content),
        }
    }
}
