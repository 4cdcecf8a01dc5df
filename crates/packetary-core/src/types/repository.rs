//! Repository record types.
//!
//! Repositories are equal when name, url and section all match, but hash
//! on name and url only. Repositories that differ only in section share a
//! hash bucket while remaining distinct keys, which lets callers group
//! them by location cheaply.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Package repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Section::is_empty")]
    pub section: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

/// Ordered section tokens of a repository (e.g. suite and component)
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "SectionRepr", into = "Vec<String>")]
pub struct Section(Vec<String>);

/// Serialized forms: a single token or a list of tokens
#[derive(Deserialize)]
#[serde(untagged)]
enum SectionRepr {
    One(String),
    Many(Vec<String>),
}

impl Repository {
    /// Create a repository reference
    pub fn new(name: impl Into<String>, url: impl Into<String>, section: impl Into<Section>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            section: section.into(),
            origin: None,
            architecture: None,
            priority: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = Some(architecture.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Projection used for hashing
    pub fn hash_key(&self) -> (&str, &str) {
        (&self.name, &self.url)
    }

    /// Projection used for equality and ordering
    pub fn equality_key(&self) -> (&str, &str, &Section) {
        (&self.name, &self.url, &self.section)
    }
}

impl Section {
    /// No section at all
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for Section {
    fn from(token: &str) -> Self {
        Self(vec![token.to_string()])
    }
}

impl From<String> for Section {
    fn from(token: String) -> Self {
        Self(vec![token])
    }
}

impl From<Vec<String>> for Section {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl From<&[&str]> for Section {
    fn from(tokens: &[&str]) -> Self {
        Self(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Section {
    fn from(tokens: [&str; N]) -> Self {
        Self::from(&tokens[..])
    }
}

impl<T: Into<Section>> From<Option<T>> for Section {
    fn from(section: Option<T>) -> Self {
        section.map(Into::into).unwrap_or_default()
    }
}

impl From<SectionRepr> for Section {
    fn from(repr: SectionRepr) -> Self {
        match repr {
            SectionRepr::One(token) => Self::from(token),
            SectionRepr::Many(tokens) => Self(tokens),
        }
    }
}

impl From<Section> for Vec<String> {
    fn from(section: Section) -> Self {
        section.0
    }
}

impl PartialEq for Repository {
    fn eq(&self, other: &Self) -> bool {
        self.equality_key() == other.equality_key()
    }
}

impl Eq for Repository {}

impl Hash for Repository {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_key().hash(state);
    }
}

impl PartialOrd for Repository {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Repository {
    fn cmp(&self, other: &Self) -> Ordering {
        self.equality_key().cmp(&other.equality_key())
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)?;
        for token in self.section.tokens() {
            write!(f, " {}", token)?;
        }
        Ok(())
    }
}
