//! Package version type.
//!
//! A version is the triple `[epoch:]version[-release]`. Epochs compare
//! numerically, version and release are `.`-separated segment lists where
//! a segment made only of digits compares as an integer and anything else
//! compares lexically.
//!
//! A version without a release is a release-agnostic match point: it is
//! equal to every version sharing its epoch and version segments. This
//! makes the ordering an equivalence on those groups rather than a strict
//! total order once versions with and without releases are mixed.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{PacketaryError, PacketaryResult};

/// Package version (epoch:version-release)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    epoch: u64,
    version: Vec<String>,
    release: Option<Vec<String>>,
}

/// Anything that can stand on the right-hand side of a version comparison.
///
/// Structured versions are borrowed as-is, raw strings are parsed first.
pub trait AsVersion {
    fn as_version(&self) -> PacketaryResult<Cow<'_, Version>>;
}

impl Version {
    /// Create a version from already split components.
    ///
    /// The components must render to a string that parses back to the very
    /// same components, so the serialized form can always be read again.
    pub fn new(epoch: u64, version: Vec<String>, release: Option<Vec<String>>) -> PacketaryResult<Self> {
        let candidate = Self {
            epoch,
            version,
            release,
        };

        let rendered = candidate.to_string();
        let reparsed: Version = rendered.parse()?;
        if reparsed.epoch == candidate.epoch
            && reparsed.version == candidate.version
            && reparsed.release == candidate.release
        {
            Ok(candidate)
        } else {
            Err(PacketaryError::invalid_version(
                rendered,
                "components do not survive rendering",
            ))
        }
    }

    /// Parse a version string
    pub fn parse(input: &str) -> PacketaryResult<Self> {
        input.parse()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn version(&self) -> &[String] {
        &self.version
    }

    pub fn release(&self) -> Option<&[String]> {
        self.release.as_deref()
    }

    /// Compare against a structured version or a raw version string.
    ///
    /// Fails only when `other` is a string that does not parse.
    pub fn compare<V: AsVersion + ?Sized>(&self, other: &V) -> PacketaryResult<Ordering> {
        let other = other.as_version()?;
        Ok(self.cmp(&*other))
    }

    /// Sort `versions` once the ordering is known to be total over them.
    ///
    /// That holds when every version carries a release or none does, and
    /// each segment position holds only numeric or only lexical tokens.
    /// Other slices are left untouched and reported as `Unorderable`.
    pub fn try_sort(versions: &mut [Version]) -> PacketaryResult<()> {
        let with_release = versions.iter().filter(|v| v.release.is_some()).count();
        if with_release != 0 && with_release != versions.len() {
            return Err(PacketaryError::Unorderable {
                reason: format!(
                    "{} of {} versions carry a release",
                    with_release,
                    versions.len()
                ),
            });
        }

        check_segment_kinds("version", versions.iter().map(|v| v.version.as_slice()))?;
        check_segment_kinds("release", versions.iter().filter_map(|v| v.release.as_deref()))?;

        versions.sort();
        Ok(())
    }
}

/// Reject segment lists whose tokens at one position mix numeric and lexical
fn check_segment_kinds<'a>(
    part: &str,
    lists: impl Iterator<Item = &'a [String]>,
) -> PacketaryResult<()> {
    // true for a numeric position
    let mut kinds: Vec<bool> = Vec::new();

    for segments in lists {
        for (position, segment) in segments.iter().enumerate() {
            let numeric = is_numeric(segment);
            match kinds.get(position) {
                Some(&kind) if kind != numeric => {
                    return Err(PacketaryError::Unorderable {
                        reason: format!(
                            "{} segment {} mixes numeric and lexical tokens ('{}')",
                            part,
                            position + 1,
                            segment
                        ),
                    });
                },
                Some(_) => {},
                None => kinds.push(numeric),
            }
        }
    }

    Ok(())
}

impl FromStr for Version {
    type Err = PacketaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        parse_version(input).map_err(|reason| {
            tracing::debug!(version = %input, %reason, "rejected version string");
            PacketaryError::invalid_version(input, reason)
        })
    }
}

fn parse_version(input: &str) -> Result<Version, &'static str> {
    if input.is_empty() {
        return Err("version string is empty");
    }

    // Only the first ':' separates the epoch
    let (epoch, rest) = match input.split_once(':') {
        Some((epoch, rest)) => (parse_epoch(epoch)?, rest),
        None => (0, input),
    };

    // Only the first '-' separates the release
    let (upstream, release) = match rest.split_once('-') {
        Some((upstream, release)) => (upstream, Some(release)),
        None => (rest, None),
    };

    if upstream.is_empty() {
        return Err("upstream version is empty");
    }
    if release == Some("") {
        return Err("release is empty");
    }

    Ok(Version {
        epoch,
        version: split_segments(upstream),
        release: release.map(split_segments),
    })
}

fn parse_epoch(epoch: &str) -> Result<u64, &'static str> {
    if !is_numeric(epoch) {
        return Err("epoch must be a non-negative integer");
    }
    epoch.parse().map_err(|_| "epoch is out of range")
}

fn split_segments(text: &str) -> Vec<String> {
    text.split('.').map(str::to_string).collect()
}

fn is_numeric(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Digits without leading zeros, so equal numbers share one spelling.
fn strip_zeros(digits: &str) -> &str {
    match digits.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    }
}

fn compare_segment(a: &str, b: &str) -> Ordering {
    if is_numeric(a) && is_numeric(b) {
        // Arbitrary precision: a longer digit run is a bigger number
        let (a, b) = (strip_zeros(a), strip_zeros(b));
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    } else {
        a.cmp(b)
    }
}

fn compare_segments(a: &[String], b: &[String]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match compare_segment(x, y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    // A strict prefix sorts first
    a.len().cmp(&b.len())
}

/// Debian ordering: epoch, then upstream segments, then release.
///
/// This is not a total order over arbitrary versions. An absent release
/// equals every release, and numeric and lexical tokens at the same segment
/// position can form cycles (`9 < 10 < 1a < 9`). `slice::sort` may panic and
/// ordered collections may misbehave on such input; [`Version::try_sort`]
/// checks the slice first.
impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| compare_segments(&self.version, &other.version))
            .then_with(|| match (&self.release, &other.release) {
                (Some(a), Some(b)) => compare_segments(a, b),
                // An absent release matches any release
                _ => Ordering::Equal,
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    // Release never takes part: "1.0" equals "1.0-<anything>"
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.epoch.hash(state);
        self.version.len().hash(state);
        for segment in &self.version {
            if is_numeric(segment) {
                strip_zeros(segment).hash(state);
            } else {
                segment.hash(state);
            }
        }
    }
}

impl PartialEq<str> for Version {
    fn eq(&self, other: &str) -> bool {
        matches!(self.compare(other), Ok(Ordering::Equal))
    }
}

impl PartialEq<&str> for Version {
    fn eq(&self, other: &&str) -> bool {
        <Self as PartialEq<str>>::eq(self, other)
    }
}

impl PartialOrd<str> for Version {
    /// Unparsable strings are incomparable
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl PartialOrd<&str> for Version {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        <Self as PartialOrd<str>>::partial_cmp(self, other)
    }
}

impl AsVersion for Version {
    fn as_version(&self) -> PacketaryResult<Cow<'_, Version>> {
        Ok(Cow::Borrowed(self))
    }
}

impl AsVersion for str {
    fn as_version(&self) -> PacketaryResult<Cow<'_, Version>> {
        self.parse().map(Cow::Owned)
    }
}

impl AsVersion for String {
    fn as_version(&self) -> PacketaryResult<Cow<'_, Version>> {
        self.as_str().as_version()
    }
}

impl<T: AsVersion + ?Sized> AsVersion for &T {
    fn as_version(&self) -> PacketaryResult<Cow<'_, Version>> {
        (**self).as_version()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}:", self.epoch)?;
        }

        write!(f, "{}", self.version.join("."))?;

        if let Some(ref release) = self.release {
            write!(f, "-{}", release.join("."))?;
        }

        Ok(())
    }
}

impl From<u64> for Version {
    fn from(number: u64) -> Self {
        Self {
            epoch: 0,
            version: vec![number.to_string()],
            release: None,
        }
    }
}

impl TryFrom<String> for Version {
    type Error = PacketaryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}
