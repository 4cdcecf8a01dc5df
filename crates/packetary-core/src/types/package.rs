//! Package record types.
//!
//! A package is identified by its name and version; the remaining fields
//! describe the file in the repository and its relations to other
//! packages, and never take part in equality, hashing or ordering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{Relation, Version};

/// Package from a repository index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: Version,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<FileChecksum>,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub requires: Vec<Relation>,
    #[serde(default)]
    pub provides: Vec<Relation>,
    #[serde(default)]
    pub obsoletes: Vec<Relation>,
}

/// Checksums of a package file
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileChecksum {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl Package {
    /// Create a package with only the identifying fields set
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            filename: None,
            filesize: None,
            checksum: None,
            mandatory: false,
            requires: Vec::new(),
            provides: Vec::new(),
            obsoletes: Vec::new(),
        }
    }

    /// Set the file location inside the repository
    pub fn with_file(mut self, filename: impl Into<String>, filesize: u64) -> Self {
        self.filename = Some(filename.into());
        self.filesize = Some(filesize);
        self
    }

    pub fn with_checksum(mut self, checksum: FileChecksum) -> Self {
        self.checksum = Some(checksum);
        self
    }

    /// Mark the package as required in every mirror
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn with_requires(mut self, relation: Relation) -> Self {
        self.requires.push(relation);
        self
    }

    pub fn with_provides(mut self, relation: Relation) -> Self {
        self.provides.push(relation);
        self
    }

    pub fn with_obsoletes(mut self, relation: Relation) -> Self {
        self.obsoletes.push(relation);
        self
    }
}

impl FileChecksum {
    pub fn sha256(digest: impl Into<String>) -> Self {
        Self {
            sha256: Some(digest.into()),
            ..Self::default()
        }
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.version == other.version
    }
}

impl Eq for Package {}

impl Hash for Package {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version.hash(state);
    }
}

impl PartialOrd for Package {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Name first, then version.
///
/// Inherits the gaps of the version ordering: packages of one name whose
/// versions mix absent and present releases, or numeric and lexical tokens
/// at one segment position, are not totally ordered and may make
/// `slice::sort` panic. Check such versions with [`Version::try_sort`] first.
impl Ord for Package {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.version.cmp(&other.version))
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}
