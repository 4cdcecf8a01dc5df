//! Mirror configuration parsing and serialization in JSON

use packetary_core::error::PacketaryError;
use tracing::debug;

use crate::mirror::{validate_config, MirrorConfig};
use crate::ConfigResult;

/// Parse and validate a JSON mirror configuration
pub fn parse_mirror_json(content: &str) -> ConfigResult<MirrorConfig> {
    let config: MirrorConfig = serde_json::from_str(content).map_err(|e| PacketaryError::JsonParse {
        message: format!("JSON parsing error: {}", e),
    })?;

    validate_config(&config)?;

    debug!(
        repositories = config.repositories.len(),
        packages = config.packages.len(),
        requirements = config.requirements.len(),
        "parsed JSON mirror configuration"
    );

    Ok(config)
}

/// Serialize a mirror configuration to JSON
pub fn serialize_mirror_json(config: &MirrorConfig) -> ConfigResult<String> {
    serde_json::to_string_pretty(config).map_err(|e| PacketaryError::JsonParse {
        message: format!("JSON serialization error: {}", e),
    })
}
