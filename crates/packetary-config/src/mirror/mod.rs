//! Format-independent mirror configuration model and validation

use std::collections::HashSet;

use packetary_core::error::PacketaryError;
use packetary_core::types::{FileChecksum, Package, Relation, Repository, Version};
use serde::{Deserialize, Serialize};

use crate::ConfigResult;

/// Complete mirror configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Requirements the mirror must satisfy, one OR-chain each
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<RequirementSpec>,

    /// Source repositories
    #[serde(default, rename = "repository", alias = "repositories")]
    pub repositories: Vec<Repository>,

    /// Packages listed explicitly
    #[serde(default, rename = "package", alias = "packages", skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<PackageEntry>,
}

/// Requirement specification (bare package name or OR-chain of tuples)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequirementSpec {
    /// Any version of a single package
    Name(String),

    /// Relation tuples `[name]` or `[name, op, version]`, alternatives in order
    Chain(Vec<Vec<String>>),
}

/// Explicitly listed package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageEntry {
    pub name: String,

    pub version: Version,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,

    #[serde(default)]
    pub mandatory: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<RequirementSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<FileChecksum>,
}

impl MirrorConfig {
    /// Build the requirement relations in document order
    pub fn relations(&self) -> ConfigResult<Vec<Relation>> {
        self.requirements.iter().map(RequirementSpec::to_relation).collect()
    }

    /// Build the explicitly listed packages in document order
    pub fn packages(&self) -> ConfigResult<Vec<Package>> {
        self.packages.iter().map(PackageEntry::to_package).collect()
    }

    /// Find a repository by name
    pub fn repository(&self, name: &str) -> Option<&Repository> {
        self.repositories.iter().find(|repo| repo.name == name)
    }
}

impl RequirementSpec {
    /// Build the relation chain this specification describes
    pub fn to_relation(&self) -> ConfigResult<Relation> {
        match self {
            RequirementSpec::Name(name) => Relation::from_args([[name.as_str()]]),
            RequirementSpec::Chain(tuples) => Relation::from_args(tuples),
        }
    }
}

impl From<&Relation> for RequirementSpec {
    fn from(relation: &Relation) -> Self {
        let tuples = relation
            .iter()
            .map(|link| match (link.version().op(), link.version().edge()) {
                (Some(op), Some(edge)) => {
                    vec![link.name().to_string(), op.to_string(), edge.to_string()]
                },
                _ => vec![link.name().to_string()],
            })
            .collect();
        RequirementSpec::Chain(tuples)
    }
}

impl PackageEntry {
    /// Build the package record
    pub fn to_package(&self) -> ConfigResult<Package> {
        let mut package = Package::new(self.name.clone(), self.version.clone());
        package.filename = self.filename.clone();
        package.filesize = self.filesize;
        package.checksum = self.checksum.clone();
        package.mandatory = self.mandatory;
        package.requires = self
            .requires
            .iter()
            .map(RequirementSpec::to_relation)
            .collect::<ConfigResult<_>>()?;
        Ok(package)
    }
}

/// Validate configuration completeness
pub fn validate_config(config: &MirrorConfig) -> ConfigResult<()> {
    let mut seen = HashSet::new();

    for (i, repo) in config.repositories.iter().enumerate() {
        if repo.name.trim().is_empty() {
            return Err(PacketaryError::config(
                format!("repository[{}].name", i),
                "repository name is required",
            ));
        }

        if repo.url.trim().is_empty() {
            return Err(PacketaryError::config(
                format!("repository[{}].url", i),
                format!("repository '{}' has no url", repo.name),
            ));
        }

        if !seen.insert(repo) {
            return Err(PacketaryError::config(
                format!("repository[{}]", i),
                format!("duplicate repository '{}' ({})", repo.name, repo),
            ));
        }
    }

    for (i, entry) in config.packages.iter().enumerate() {
        if entry.name.trim().is_empty() {
            return Err(PacketaryError::config(
                format!("package[{}].name", i),
                "package name is required",
            ));
        }

        for (j, spec) in entry.requires.iter().enumerate() {
            validate_requirement(format!("package[{}].requires[{}]", i, j), spec)?;
        }
    }

    for (i, spec) in config.requirements.iter().enumerate() {
        validate_requirement(format!("requirements[{}]", i), spec)?;
    }

    Ok(())
}

/// Validate a requirement specification, reporting the offending field
fn validate_requirement(field: String, spec: &RequirementSpec) -> ConfigResult<()> {
    spec.to_relation()
        .map(|_| ())
        .map_err(|e| PacketaryError::config(field, e.to_string()))
}
