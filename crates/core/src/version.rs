//! Feature version identifiers
//!
//! A feature version is a Cargo feature named `v<major>-<minor>` with an
//! optional free-form suffix, e.g. `v0-1`, `v12-3beta`. The pattern is anchored
//! at the start only, so anything after the minor digits is kept as the suffix.
//!
//! Two orderings exist for versions. Manifest order (position in the
//! `[features]` section) drives cumulative resolution. The structural order
//! implemented by [`Ord`] compares major, then minor, then suffix, and backs
//! [`is_covered`] and [`sort_versions`].
//!
//! ```rust
//! use vtest_core::version::{is_covered, is_valid_version, FeatureVersion};
//!
//! assert!(is_valid_version("v12-3beta"));
//! assert!(!is_valid_version("banana"));
//!
//! let available: Vec<FeatureVersion> = ["v0-1", "v1-0"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//! assert!(is_covered(&"v0-5".parse().unwrap(), &available));
//! ```

use crate::errors::VersionError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// `v`, major digits, `-`, minor digits, then any suffix
pub const VERSION_PATTERN: &str = r"^v([0-9]+)-([0-9]+)(?s)(.*)$";

static VERSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(VERSION_PATTERN).expect("Valid regex pattern"));

/// Check whether `candidate` is a well-formed feature version
///
/// Only the shape is checked; membership in a manifest is the resolver's job.
pub fn is_valid_version(candidate: &str) -> bool {
    VERSION_REGEX.is_match(candidate)
}

/// A validated feature version identifier
#[derive(Debug, Clone)]
pub struct FeatureVersion {
    raw: String,
    major: String,
    minor: String,
    suffix: String,
}

/// Digits with leading zeros stripped, `"0"` if nothing is left
fn normalize_digits(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Numeric comparison of normalized digit strings of any length
fn cmp_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl FeatureVersion {
    /// Parse and validate an identifier
    ///
    /// Succeeds exactly when [`is_valid_version`] does; components are kept
    /// as digit strings so no width limit applies.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let captures = VERSION_REGEX
            .captures(input)
            .ok_or_else(|| VersionError::InvalidFormat {
                input: input.to_string(),
            })?;

        Ok(Self {
            raw: input.to_string(),
            major: normalize_digits(&captures[1]),
            minor: normalize_digits(&captures[2]),
            suffix: captures[3].to_string(),
        })
    }

    /// The identifier exactly as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Major digits without leading zeros
    pub fn major(&self) -> &str {
        &self.major
    }

    /// Minor digits without leading zeros
    pub fn minor(&self) -> &str {
        &self.minor
    }

    /// Trailing text after the minor digits (empty for plain versions)
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl FromStr for FeatureVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FeatureVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for FeatureVersion {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for FeatureVersion {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for FeatureVersion {}

impl PartialOrd for FeatureVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FeatureVersion {
    // Raw text breaks ties between spellings like `v01-0` and `v1-0`
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_digits(&self.major, &other.major)
            .then_with(|| cmp_digits(&self.minor, &other.minor))
            .then_with(|| self.suffix.cmp(&other.suffix))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl Serialize for FeatureVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Sort versions in ascending structural order
pub fn sort_versions(versions: &mut [FeatureVersion]) {
    versions.sort();
}

/// Check whether `target` falls within the catalog
///
/// A target is covered when it is listed, or when it lies between the
/// structurally smallest and largest listed versions (`v0-5` is covered by
/// `[v0-1, v1-0]`). An empty catalog covers nothing.
pub fn is_covered(target: &FeatureVersion, available: &[FeatureVersion]) -> bool {
    if available.contains(target) {
        return true;
    }
    match (available.iter().min(), available.iter().max()) {
        (Some(low), Some(high)) => low <= target && target <= high,
        _ => false,
    }
}
