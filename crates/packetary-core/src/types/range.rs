//! Version range constraints.
//!
//! A range is either unconstrained or a comparison operator applied to an
//! edge version. Ranges map onto half-lines or single points, which makes
//! "can both constraints hold at once" a plain interval-overlap test.

use serde::{Deserialize, Serialize};
use std::any::{type_name, Any};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

use super::Version;
use crate::error::{PacketaryError, PacketaryResult};

/// Comparison operator of a version range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

/// Constraint on acceptable versions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionRange {
    /// Matches every version
    #[default]
    Any,
    /// Versions standing in `op` relation to `edge`
    Bounded { op: Op, edge: Version },
}

impl Op {
    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
        }
    }

    /// Check whether `ordering` (version compared to edge) satisfies the operator
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Lt => ordering == Ordering::Less,
            Op::Le => ordering != Ordering::Greater,
            Op::Gt => ordering == Ordering::Greater,
            Op::Ge => ordering != Ordering::Less,
        }
    }
}

impl FromStr for Op {
    type Err = PacketaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" | "==" => Ok(Op::Eq),
            "<" => Ok(Op::Lt),
            "<=" => Ok(Op::Le),
            ">" => Ok(Op::Gt),
            ">=" => Ok(Op::Ge),
            other => Err(PacketaryError::invalid_relation(format!(
                "unknown operator '{}', expected one of =, <, <=, >, >=",
                other
            ))),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl VersionRange {
    /// The unconstrained range
    pub fn any() -> Self {
        VersionRange::Any
    }

    /// A range bounded by `op` against `edge`
    pub fn bounded(op: Op, edge: impl Into<Version>) -> Self {
        VersionRange::Bounded {
            op,
            edge: edge.into(),
        }
    }

    /// Create a range from optional parts; an operator requires an edge and
    /// an edge requires an operator.
    pub fn new(op: Option<Op>, edge: Option<Version>) -> PacketaryResult<Self> {
        match (op, edge) {
            (None, None) => Ok(VersionRange::Any),
            (Some(op), Some(edge)) => Ok(VersionRange::Bounded { op, edge }),
            (Some(op), None) => Err(PacketaryError::invalid_relation(format!(
                "operator '{}' given without a version",
                op
            ))),
            (None, Some(edge)) => Err(PacketaryError::invalid_relation(format!(
                "version '{}' given without an operator",
                edge
            ))),
        }
    }

    /// Create a range from raw operator and edge strings
    pub fn from_parts(op: Option<&str>, edge: Option<&str>) -> PacketaryResult<Self> {
        let op = op.map(str::parse::<Op>).transpose()?;
        let edge = edge.map(Version::parse).transpose()?;
        Self::new(op, edge)
    }

    pub fn op(&self) -> Option<Op> {
        match self {
            VersionRange::Any => None,
            VersionRange::Bounded { op, .. } => Some(*op),
        }
    }

    pub fn edge(&self) -> Option<&Version> {
        match self {
            VersionRange::Any => None,
            VersionRange::Bounded { edge, .. } => Some(edge),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, VersionRange::Any)
    }

    /// Check if a version satisfies this range
    pub fn satisfies(&self, version: &Version) -> bool {
        match self {
            VersionRange::Any => true,
            VersionRange::Bounded { op, edge } => op.accepts(version.cmp(edge)),
        }
    }

    /// Check whether some version satisfies both ranges.
    ///
    /// The larger lower bound and the smaller upper bound are kept; on a tie
    /// the exclusive bound wins. The ranges meet when the lower bound sits
    /// below the upper one, or on it when neither is exclusive there.
    pub fn has_intersection(&self, other: &VersionRange) -> bool {
        let lower = max_lower(self.start_bound(), other.start_bound());
        let upper = min_upper(self.end_bound(), other.end_bound());

        let ((low, low_open), (high, high_open)) = match (point(lower), point(upper)) {
            (Some(low), Some(high)) => (low, high),
            // An infinite side always leaves room
            _ => return true,
        };

        match low.cmp(high) {
            Ordering::Less => true,
            Ordering::Equal => !low_open && !high_open,
            Ordering::Greater => false,
        }
    }

    /// Dynamically typed variant of [`has_intersection`](Self::has_intersection)
    /// for callers holding an operand of any type.
    pub fn try_has_intersection<T: Any>(&self, other: &T) -> PacketaryResult<bool> {
        match (other as &dyn Any).downcast_ref::<VersionRange>() {
            Some(other) => Ok(self.has_intersection(other)),
            None => Err(PacketaryError::TypeMismatch {
                expected: type_name::<VersionRange>().to_string(),
                found: type_name::<T>().to_string(),
            }),
        }
    }
}

fn point(bound: Bound<&Version>) -> Option<(&Version, bool)> {
    match bound {
        Bound::Included(version) => Some((version, false)),
        Bound::Excluded(version) => Some((version, true)),
        Bound::Unbounded => None,
    }
}

fn max_lower<'a>(a: Bound<&'a Version>, b: Bound<&'a Version>) -> Bound<&'a Version> {
    match (point(a), point(b)) {
        (None, _) => b,
        (_, None) => a,
        (Some((x, x_open)), Some((y, y_open))) => match x.cmp(y) {
            Ordering::Greater => a,
            Ordering::Less => b,
            Ordering::Equal if x_open || y_open => Bound::Excluded(x),
            Ordering::Equal => Bound::Included(x),
        },
    }
}

fn min_upper<'a>(a: Bound<&'a Version>, b: Bound<&'a Version>) -> Bound<&'a Version> {
    match (point(a), point(b)) {
        (None, _) => b,
        (_, None) => a,
        (Some((x, x_open)), Some((y, y_open))) => match x.cmp(y) {
            Ordering::Less => a,
            Ordering::Greater => b,
            Ordering::Equal if x_open || y_open => Bound::Excluded(x),
            Ordering::Equal => Bound::Included(x),
        },
    }
}

impl RangeBounds<Version> for VersionRange {
    fn start_bound(&self) -> Bound<&Version> {
        match self {
            VersionRange::Bounded { op: Op::Eq | Op::Ge, edge } => Bound::Included(edge),
            VersionRange::Bounded { op: Op::Gt, edge } => Bound::Excluded(edge),
            _ => Bound::Unbounded,
        }
    }

    fn end_bound(&self) -> Bound<&Version> {
        match self {
            VersionRange::Bounded { op: Op::Eq | Op::Le, edge } => Bound::Included(edge),
            VersionRange::Bounded { op: Op::Lt, edge } => Bound::Excluded(edge),
            _ => Bound::Unbounded,
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRange::Any => write!(f, "any"),
            VersionRange::Bounded { op, edge } => write!(f, "{} {}", op, edge),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(op: Option<&str>, edge: Option<u64>) -> VersionRange {
        let edge = edge.map(|e| e.to_string());
        VersionRange::from_parts(op, edge.as_deref()).unwrap()
    }

    fn check_intersection(expected: bool, cases: &[((Option<&str>, Option<u64>), (Option<&str>, Option<u64>))]) {
        for ((op1, edge1), (op2, edge2)) in cases {
            let r1 = range(*op1, *edge1);
            let r2 = range(*op2, *edge2);
            assert_eq!(r1.has_intersection(&r2), expected, "{} and {}", r1, r2);
            assert_eq!(r2.has_intersection(&r1), expected, "{} and {}", r2, r1);
        }
    }

    #[test]
    fn test_range_equality() {
        assert_eq!(range(Some("="), Some(1)), range(Some("="), Some(1)));
        assert_ne!(range(Some("="), Some(1)), range(Some("<="), Some(1)));
        assert_ne!(range(Some("="), Some(1)), range(Some("="), Some(2)));
        assert_eq!(VersionRange::any(), VersionRange::default());
    }

    #[test]
    fn test_range_requires_op_and_edge_together() {
        assert!(matches!(
            VersionRange::new(Some(Op::Le), None),
            Err(PacketaryError::InvalidRelation { .. })
        ));
        assert!(matches!(
            VersionRange::new(None, Some(Version::from(3))),
            Err(PacketaryError::InvalidRelation { .. })
        ));
        assert_eq!(VersionRange::new(None, None).unwrap(), VersionRange::Any);
    }

    #[test]
    fn test_unknown_operator() {
        assert!(matches!(
            VersionRange::from_parts(Some("~="), Some("1")),
            Err(PacketaryError::InvalidRelation { .. })
        ));
        assert_eq!("==".parse::<Op>().unwrap(), Op::Eq);
    }

    #[test]
    fn test_satisfies() {
        let two = Version::from(2);
        let three = Version::from(3);

        assert!(VersionRange::any().satisfies(&two));
        assert!(range(Some("="), Some(2)).satisfies(&two));
        assert!(!range(Some("<"), Some(2)).satisfies(&two));
        assert!(range(Some("<="), Some(2)).satisfies(&two));
        assert!(range(Some(">"), Some(2)).satisfies(&three));
        assert!(!range(Some(">="), Some(3)).satisfies(&two));
    }

    #[test]
    fn test_have_intersection() {
        check_intersection(
            true,
            &[
                ((Some("="), Some(2)), (Some("="), Some(2))),
                ((Some("="), Some(2)), (Some("<"), Some(3))),
                ((Some("="), Some(2)), (Some(">"), Some(1))),
                ((Some("<"), Some(2)), (Some(">"), Some(1))),
                ((Some("<"), Some(2)), (Some("<"), Some(3))),
                ((Some("<"), Some(2)), (Some("<"), Some(2))),
                ((Some("<"), Some(2)), (Some("<="), Some(2))),
                ((Some(">"), Some(2)), (Some(">"), Some(1))),
                ((Some(">"), Some(2)), (Some("<"), Some(3))),
                ((Some(">"), Some(2)), (Some(">="), Some(2))),
                ((Some(">"), Some(2)), (Some(">"), Some(2))),
                ((Some(">="), Some(2)), (Some("<="), Some(2))),
                ((None, None), (Some("="), Some(2))),
                ((None, None), (None, None)),
            ],
        );
    }

    #[test]
    fn test_does_not_have_intersection() {
        check_intersection(
            false,
            &[
                ((Some("="), Some(2)), (Some("="), Some(1))),
                ((Some("="), Some(2)), (Some("<"), Some(2))),
                ((Some("="), Some(2)), (Some(">"), Some(2))),
                ((Some("="), Some(2)), (Some(">"), Some(3))),
                ((Some("="), Some(2)), (Some("<"), Some(1))),
                ((Some("<"), Some(2)), (Some(">="), Some(2))),
                ((Some("<"), Some(2)), (Some(">"), Some(3))),
                ((Some(">"), Some(2)), (Some("<="), Some(2))),
                ((Some(">"), Some(2)), (Some("<"), Some(1))),
            ],
        );
    }

    #[test]
    fn test_intersection_is_typesafe() {
        let r = range(Some("="), Some(1));

        let err = r.try_has_intersection(&("=", 1u64)).unwrap_err();
        match err {
            PacketaryError::TypeMismatch { expected, found } => {
                assert!(expected.ends_with("VersionRange"));
                assert_eq!(found, type_name::<(&str, u64)>());
            },
            other => panic!("unexpected error: {:?}", other),
        }

        let err = r.try_has_intersection(&Version::from(1)).unwrap_err();
        assert!(matches!(err, PacketaryError::TypeMismatch { ref found, .. } if found == type_name::<Version>()));
        assert!(r.try_has_intersection(&"= 1").is_err());

        assert!(r.try_has_intersection(&range(Some("<="), Some(1))).unwrap());
    }

    #[test]
    fn test_range_bounds() {
        let r = range(Some(">="), Some(2));
        assert_eq!(r.start_bound(), Bound::Included(&Version::from(2)));
        assert_eq!(r.end_bound(), Bound::Unbounded);

        let r = range(Some("<"), Some(2));
        assert_eq!(r.start_bound(), Bound::Unbounded);
        assert_eq!(r.end_bound(), Bound::Excluded(&Version::from(2)));
    }

    #[test]
    fn test_range_display() {
        assert_eq!(VersionRange::any().to_string(), "any");
        assert_eq!(range(Some("<="), Some(2)).to_string(), "<= 2");
        assert_eq!(
            VersionRange::bounded(Op::Ge, Version::parse("1:2.0-3").unwrap()).to_string(),
            ">= 1:2.0-3"
        );
    }
}
