//! Dependency relation types.
//!
//! A relation names a package and a version range, and may chain an
//! alternative relation: `a (<= 2) | b | c` is satisfied by any one of
//! its links. The chain is singly linked with exclusive ownership of the
//! tail, so iteration is forward-only and restartable from the head.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use super::{Package, VersionRange};
use crate::error::{PacketaryError, PacketaryResult};

/// Named version constraint with an optional alternative.
///
/// Dropping, cloning and debug-printing walk the chain in a loop, so chain
/// length is bounded by memory rather than stack depth.
#[derive(Serialize, Deserialize)]
pub struct Relation {
    name: String,
    #[serde(default)]
    version: VersionRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alternative: Option<Box<Relation>>,
}

/// Iterator over a relation and its alternatives
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    next: Option<&'a Relation>,
}

impl Relation {
    /// Create a terminal relation
    pub fn new(name: impl Into<String>, version: VersionRange) -> Self {
        Self {
            name: name.into(),
            version,
            alternative: None,
        }
    }

    /// Build an OR-chain from relation tuples, linked in input order.
    ///
    /// Each tuple is `[name]` or `[name, op, edge]`. A tuple carrying an
    /// operator without an edge, or anything else, is rejected.
    pub fn from_args<I, T, S>(args: I) -> PacketaryResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[S]>,
        S: AsRef<str>,
    {
        let links = args
            .into_iter()
            .map(|tuple| parse_tuple(tuple.as_ref()))
            .collect::<PacketaryResult<Vec<_>>>()?;

        let mut chain: Option<Box<Relation>> = None;
        for mut relation in links.into_iter().rev() {
            relation.alternative = chain;
            chain = Some(Box::new(relation));
        }

        chain
            .map(|head| *head)
            .ok_or_else(|| PacketaryError::invalid_relation("at least one relation tuple is required"))
    }

    /// Append `alternative` at the end of this chain
    pub fn with_alternative(mut self, alternative: Relation) -> Self {
        let mut tail = &mut self.alternative;
        while let Some(next) = tail {
            tail = &mut next.alternative;
        }
        *tail = Some(Box::new(alternative));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &VersionRange {
        &self.version
    }

    pub fn alternative(&self) -> Option<&Relation> {
        self.alternative.as_deref()
    }

    /// Iterate over this relation followed by its alternatives
    pub fn iter(&self) -> Iter<'_> {
        Iter { next: Some(self) }
    }

    /// Number of links in the chain (always at least one)
    pub fn chain_len(&self) -> usize {
        self.iter().count()
    }

    /// Check if some link of the chain is satisfied by `package`
    pub fn matches(&self, package: &Package) -> bool {
        self.iter()
            .any(|link| link.name == package.name && link.version.satisfies(&package.version))
    }
}

fn parse_tuple<S: AsRef<str>>(tuple: &[S]) -> PacketaryResult<Relation> {
    let parts: Vec<&str> = tuple.iter().map(AsRef::as_ref).collect();

    let relation = match parts.as_slice() {
        [name] => Ok(Relation::new(*name, VersionRange::Any)),
        [name, op, edge] => VersionRange::from_parts(Some(*op), Some(*edge))
            .map(|version| Relation::new(*name, version)),
        [name, op] => Err(PacketaryError::invalid_relation(format!(
            "relation '{}' has operator '{}' without a version",
            name, op
        ))),
        _ => Err(PacketaryError::invalid_relation(format!(
            "expected (name) or (name, op, version), got {} values",
            parts.len()
        ))),
    };

    let relation = relation.and_then(|relation| {
        if relation.name.trim().is_empty() {
            Err(PacketaryError::invalid_relation("relation name is empty"))
        } else {
            Ok(relation)
        }
    });

    if let Err(ref err) = relation {
        tracing::debug!(tuple = ?parts, error = %err, "rejected relation tuple");
    }
    relation
}

impl Clone for Relation {
    fn clone(&self) -> Self {
        let tail: Vec<&Relation> = self.iter().skip(1).collect();

        let mut alternative: Option<Box<Relation>> = None;
        for link in tail.into_iter().rev() {
            alternative = Some(Box::new(Relation {
                name: link.name.clone(),
                version: link.version.clone(),
                alternative,
            }));
        }

        Relation {
            name: self.name.clone(),
            version: self.version.clone(),
            alternative,
        }
    }
}

impl Drop for Relation {
    fn drop(&mut self) {
        // Unlink one box at a time instead of recursing down the chain
        let mut next = self.alternative.take();
        while let Some(mut link) = next {
            next = link.alternative.take();
        }
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|link| (&link.name, &link.version)))
            .finish()
    }
}

impl PartialEq for Relation {
    // Alternatives are not part of identity
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.version == other.version
    }
}

impl Eq for Relation {}

impl Hash for Relation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version.hash(state);
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Relation;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.alternative();
        Some(current)
    }
}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Relation {
    type Item = &'a Relation;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", link.name)?;
            if let VersionRange::Bounded { op, edge } = &link.version {
                write!(f, " ({} {})", op, edge)?;
            }
        }
        Ok(())
    }
}
