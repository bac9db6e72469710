//! Semantic version value object
//!
//! Accepts `[v]major[.minor[.patch]][-pre][+build]`. A `SNAPSHOT`
//! pre-release, alone (`1.0.0-SNAPSHOT`) or trailing (`2.1.0-rc.1-SNAPSHOT`),
//! sets the snapshot flag and is dropped from the pre-release.
//!
//! Ordering follows semver precedence. Build metadata and the snapshot flag
//! do not take part in ordering, equality or hashing.
//!
//! ```rust
//! use cornerstone_common::version::Version;
//!
//! let snapshot: Version = "1.0.0-SNAPSHOT".parse()?;
//! assert_eq!(snapshot.to_tag(), "1.0.latest");
//! assert!(Version::parse("1.0.0-rc.1")? < Version::parse("1.0.0")?);
//! # Ok::<(), cornerstone_common::error::CommonError>(())
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CommonError, CommonResult};

const SNAPSHOT: &str = "SNAPSHOT";

#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    pre_release: Option<String>,
    build: Option<String>,
    snapshot: bool,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch, pre_release: None, build: None, snapshot: false }
    }

    /// Parses a version string
    ///
    /// # Errors
    ///
    /// [`CommonError::Parse`] for empty input, non-numeric or missing
    /// components, more than three components, or pre-release/build parts
    /// with an empty identifier or a character outside `[0-9A-Za-z-]`.
    pub fn parse(input: &str) -> CommonResult<Self> {
        let fail = |message: &str| CommonError::parse("version", input, message);

        let text = input.trim();
        let text = text.strip_prefix(['v', 'V']).unwrap_or(text);
        if text.is_empty() {
            return Err(fail("empty version"));
        }

        let (text, build) = match text.split_once('+') {
            Some((_, "")) => return Err(fail("empty build metadata")),
            Some((rest, build)) => {
                check_identifiers(build, "build").map_err(|message| fail(&message))?;
                (rest, Some(build.to_string()))
            }
            None => (text, None),
        };

        let (core, pre) = match text.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (text, None),
        };

        let mut numbers = [0u64; 3];
        let components: Vec<&str> = core.split('.').collect();
        if components.len() > numbers.len() {
            return Err(fail("more than three numeric components"));
        }
        for (slot, component) in numbers.iter_mut().zip(&components) {
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(fail(&format!("'{component}' is not a number")));
            }
            *slot = component
                .parse()
                .map_err(|_| fail(&format!("'{component}' is out of range")))?;
        }

        let (pre_release, snapshot) = match pre {
            None => (None, false),
            Some(pre) => split_snapshot(pre).ok_or_else(|| fail("empty pre-release"))?,
        };
        if let Some(pre) = &pre_release {
            check_identifiers(pre, "pre-release").map_err(|message| fail(&message))?;
        }

        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers[2],
            pre_release,
            build,
            snapshot,
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Pre-release without any snapshot marker
    pub fn pre_release(&self) -> Option<&str> {
        self.pre_release.as_deref()
    }

    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    pub fn is_snapshot(&self) -> bool {
        self.snapshot
    }

    /// Whether this is a pre-release or a snapshot
    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some() || self.snapshot
    }

    /// `major.minor.latest` for snapshots, `major.minor.patch` otherwise
    pub fn to_tag(&self) -> String {
        if self.snapshot {
            format!("{}.{}.latest", self.major, self.minor)
        } else {
            format!("{}.{}.{}", self.major, self.minor, self.patch)
        }
    }

    /// Same numbers without pre-release, build or snapshot
    pub fn as_release(&self) -> Self {
        Self::new(self.major, self.minor, self.patch)
    }

    pub fn next_major(&self) -> Self {
        Self::new(self.major.saturating_add(1), 0, 0)
    }

    pub fn next_minor(&self) -> Self {
        Self::new(self.major, self.minor.saturating_add(1), 0)
    }

    pub fn next_patch(&self) -> Self {
        Self::new(self.major, self.minor, self.patch.saturating_add(1))
    }

    /// Caret compatibility: same major, and same minor while major is 0
    pub fn is_compatible_with(&self, other: &Version) -> bool {
        self.major == other.major && (self.major != 0 || self.minor == other.minor)
    }
}

/// Splits a trailing or standalone `SNAPSHOT` off a pre-release
///
/// `None` when the pre-release (or what precedes `-SNAPSHOT`) is empty.
fn split_snapshot(pre: &str) -> Option<(Option<String>, bool)> {
    if pre.eq_ignore_ascii_case(SNAPSHOT) {
        return Some((None, true));
    }
    let marker_start = pre.len().checked_sub(SNAPSHOT.len() + 1);
    if let Some(start) = marker_start.filter(|start| pre.is_char_boundary(*start)) {
        let (head, tail) = pre.split_at(start);
        if tail.starts_with('-') && tail[1..].eq_ignore_ascii_case(SNAPSHOT) {
            return if head.is_empty() { None } else { Some((Some(head.to_string()), true)) };
        }
    }
    if pre.is_empty() {
        None
    } else {
        Some((Some(pre.to_string()), false))
    }
}

/// Every dot-separated identifier must be non-empty `[0-9A-Za-z-]`
fn check_identifiers(part: &str, kind: &str) -> Result<(), String> {
    for identifier in part.split('.') {
        if identifier.is_empty() {
            return Err(format!("empty {kind} identifier in '{part}'"));
        }
        if !identifier.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
            return Err(format!("invalid {kind} identifier '{identifier}'"));
        }
    }
    Ok(())
}

/// Semver precedence of two dot-separated pre-release strings
fn compare_pre_release(left: &str, right: &str) -> Ordering {
    let mut left_parts = left.split('.');
    let mut right_parts = right.split('.');
    loop {
        match (left_parts.next(), right_parts.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(a), Ok(b)) => a.cmp(&b).then_with(|| l.cmp(r)),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(l), Some(r)) => compare_pre_release(l, r),
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
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.pre_release.hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{pre}")?;
        }
        if self.snapshot {
            write!(f, "-{SNAPSHOT}")?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
