//! Error types and result aliases for Packetary operations.
//!
//! Provides a unified error type covering malformed version strings,
//! malformed relation tuples, operand type mismatches and configuration
//! documents that fail to parse or validate.

use thiserror::Error;

/// Unified error type for all Packetary operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketaryError {
    // Value object errors
    #[error("Invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("Invalid relation: {message}")]
    InvalidRelation { message: String },

    #[error("Type mismatch: expected {expected}, got {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Versions cannot be totally ordered: {reason}")]
    Unorderable { reason: String },

    // Config errors
    #[error("Failed to parse TOML configuration: {message}")]
    TomlParse { message: String },

    #[error("Failed to parse JSON configuration: {message}")]
    JsonParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },
}

/// Result type alias for Packetary operations
pub type PacketaryResult<T> = Result<T, PacketaryError>;

impl PacketaryError {
    /// Create a version parse error
    pub fn invalid_version(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a relation argument error
    pub fn invalid_relation(message: impl Into<String>) -> Self {
        Self::InvalidRelation {
            message: message.into(),
        }
    }

    /// Create a config validation error
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error only concerns the single record being built.
    ///
    /// Callers importing a batch of records skip the offending record on
    /// these errors instead of aborting the whole batch.
    pub fn is_record_local(&self) -> bool {
        matches!(
            self,
            PacketaryError::InvalidVersion { .. } | PacketaryError::InvalidRelation { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            PacketaryError::InvalidVersion { .. } => {
                Some("Versions look like [epoch:]upstream[-release], e.g. 1:2.4.1-3")
            },
            PacketaryError::InvalidRelation { .. } => {
                Some("Relation tuples are (name) or (name, operator, version)")
            },
            PacketaryError::TypeMismatch { .. } => {
                Some("Intersections can only be tested between two version ranges")
            },
            PacketaryError::Unorderable { .. } => {
                Some("Give every version a release (or none), and keep each segment position all numeric or all lexical")
            },
            PacketaryError::ConfigValidation { .. } => {
                Some("Check the repository and package entries of the configuration")
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PacketaryError::invalid_version("a:1.0", "epoch must be numeric");
        assert_eq!(err.to_string(), "Invalid version 'a:1.0': epoch must be numeric");

        let err = PacketaryError::config("repository[0].url", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Configuration field 'repository[0].url' is invalid: must not be empty"
        );
    }

    #[test]
    fn test_record_local_errors() {
        assert!(PacketaryError::invalid_version("", "empty").is_record_local());
        assert!(PacketaryError::invalid_relation("operator without edge").is_record_local());
        assert!(!PacketaryError::TomlParse {
            message: "bad".to_string()
        }
        .is_record_local());
    }

    #[test]
    fn test_suggestions() {
        assert!(PacketaryError::invalid_version("x", "y").suggestion().is_some());
        assert!(PacketaryError::JsonParse {
            message: "eof".to_string()
        }
        .suggestion()
        .is_none());
    }
}
