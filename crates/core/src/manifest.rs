//! Manifest scanning
//!
//! Reads the ordered list of feature versions from a `Cargo.toml`. The scan is
//! line based rather than a full TOML parse because only declaration order
//! matters:
//!
//! 1. Lines are skipped until one contains the [`SECTION_MARKER`].
//! 2. Each following line that starts with a feature version contributes the
//!    text before its first `=`, trimmed.
//! 3. The first line that does not start with a version ends the section.
//!
//! A `default = [...]` entry or a blank line directly after the marker
//! therefore yields an empty feature set.

use crate::errors::{ManifestError, Result};
use crate::version::{is_valid_version, sort_versions, FeatureVersion};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, instrument};

/// Line that opens the feature section
pub const SECTION_MARKER: &str = "[features]";

/// Manifest file name used when no path is given
pub const DEFAULT_MANIFEST: &str = "Cargo.toml";

/// Ordered feature versions as declared in a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FeatureSet {
    versions: Vec<FeatureVersion>,
}

impl FeatureSet {
    pub fn new(versions: Vec<FeatureVersion>) -> Self {
        Self { versions }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureVersion> {
        self.versions.iter()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn contains(&self, version: &FeatureVersion) -> bool {
        self.versions.contains(version)
    }

    pub fn as_slice(&self) -> &[FeatureVersion] {
        &self.versions
    }

    /// Identifiers in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.versions.iter().map(FeatureVersion::as_str).collect()
    }

    /// A copy of this set in structural version order
    pub fn sorted(&self) -> FeatureSet {
        let mut versions = self.versions.clone();
        sort_versions(&mut versions);
        FeatureSet { versions }
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a FeatureVersion;
    type IntoIter = std::slice::Iter<'a, FeatureVersion>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.iter()
    }
}

/// Extract the ordered feature versions from manifest text
pub fn parse_features(text: &str) -> Result<FeatureSet> {
    let mut lines = text.lines();

    if !lines.by_ref().any(|line| line.contains(SECTION_MARKER)) {
        debug!("No {} section found", SECTION_MARKER);
        return Ok(FeatureSet::default());
    }

    let mut versions = Vec::new();
    for line in lines {
        if !is_valid_version(line) {
            debug!("Feature section ends at line {:?}", line);
            break;
        }
        let name = line.split('=').next().unwrap_or(line).trim();
        versions.push(FeatureVersion::parse(name)?);
    }

    debug!("Found {} feature versions", versions.len());
    Ok(FeatureSet::new(versions))
}

/// Read a manifest from disk and list its feature versions
///
/// The file is read fresh on every call.
#[instrument]
pub fn list_available_features(path: &Path) -> Result<FeatureSet> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ManifestError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ManifestError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_features(&text)
}
