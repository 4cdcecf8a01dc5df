//! Mirror configuration parsing and serialization in TOML

use packetary_core::error::PacketaryError;
use tracing::debug;

use crate::mirror::{validate_config, MirrorConfig};
use crate::ConfigResult;

/// Parse and validate a TOML mirror configuration
pub fn parse_mirror_toml(content: &str) -> ConfigResult<MirrorConfig> {
    // Syntax pass first, its errors carry line and column
    content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| PacketaryError::TomlParse {
            message: format!("TOML syntax error: {}", e),
        })?;

    let config: MirrorConfig = toml::from_str(content).map_err(|e| PacketaryError::TomlParse {
        message: format!("TOML parsing error: {}", e),
    })?;

    validate_config(&config)?;

    debug!(
        repositories = config.repositories.len(),
        packages = config.packages.len(),
        requirements = config.requirements.len(),
        "parsed TOML mirror configuration"
    );

    Ok(config)
}

/// Serialize a mirror configuration to TOML
pub fn serialize_mirror_toml(config: &MirrorConfig) -> ConfigResult<String> {
    toml::to_string_pretty(config).map_err(|e| PacketaryError::TomlParse {
        message: format!("TOML serialization error: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::RequirementSpec;
    use packetary_core::types::{Op, Section, Version, VersionRange};

    const MIRROR: &str = r#"
requirements = [
    "perl",
    [["mail-transport-agent"], ["postfix", ">=", "2.11"]],
]

[[repository]]
name = "ubuntu"
url = "http://archive.ubuntu.com/ubuntu/"
section = ["trusty", "main"]
origin = "Ubuntu"
architecture = "amd64"
priority = 500

[[repository]]
name = "local"
url = "file:///srv/mirror"

[[package]]
name = "nginx"
version = "1:1.4.6-1ubuntu3"
filename = "pool/main/n/nginx/nginx_1.4.6-1ubuntu3_all.deb"
filesize = 4096
mandatory = true
requires = [[["libc6", ">=", "2.14"]]]

[package.checksum]
sha256 = "deadbeef"
"#;

    #[test]
    fn test_parse_full_document() {
        let config = parse_mirror_toml(MIRROR).unwrap();

        assert_eq!(config.repositories.len(), 2);
        let ubuntu = &config.repositories[0];
        assert_eq!(ubuntu.section, Section::from(["trusty", "main"]));
        assert_eq!(ubuntu.priority, Some(500));
        assert!(config.repositories[1].section.is_empty());

        let relations = config.relations().unwrap();
        assert_eq!(relations[0].to_string(), "perl");
        assert_eq!(relations[1].chain_len(), 2);

        let packages = config.packages().unwrap();
        let nginx = &packages[0];
        assert_eq!(nginx.version.epoch(), 1);
        assert!(nginx.mandatory);
        assert_eq!(nginx.requires[0].version(), &VersionRange::bounded(Op::Ge, Version::parse("2.14").unwrap()));
        assert_eq!(nginx.checksum.as_ref().and_then(|c| c.sha256.as_deref()), Some("deadbeef"));
    }

    #[test]
    fn test_plural_aliases() {
        let config = parse_mirror_toml(
            r#"
[[repositories]]
name = "a"
url = "/a"
section = "main"

[[packages]]
name = "bash"
version = "4.3"
"#,
        )
        .unwrap();

        assert_eq!(config.repositories[0].section, Section::from("main"));
        assert_eq!(config.packages[0].name, "bash");
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_mirror_toml("[[repository]\nname = ").unwrap_err();
        match err {
            PacketaryError::TomlParse { message } => assert!(message.starts_with("TOML syntax error")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_package_version() {
        let err = parse_mirror_toml("[[package]]\nname = \"a\"\nversion = \"1:\"\n").unwrap_err();
        match err {
            PacketaryError::TomlParse { message } => assert!(message.starts_with("TOML parsing error")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let err = parse_mirror_toml("[[repository]]\nname = \"a\"\nurl = \"\"\n").unwrap_err();
        assert!(matches!(err, PacketaryError::ConfigValidation { .. }));
    }

    #[test]
    fn test_serialize_then_parse() {
        let config = parse_mirror_toml(MIRROR).unwrap();
        let rendered = serialize_mirror_toml(&config).unwrap();
        let reparsed = parse_mirror_toml(&rendered).unwrap();

        assert_eq!(reparsed, config);
        assert_eq!(reparsed.requirements[0], RequirementSpec::Name("perl".to_string()));
    }
}
