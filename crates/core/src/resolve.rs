//! Cumulative feature resolution
//!
//! Testing a version means enabling it together with every version declared
//! before it. [`cumulative_features`] is the lazy primitive; it keeps the
//! historical fallback of appending an undeclared target. [`resolve_features`]
//! wraps it with an explicit membership policy and catalog ordering.

use crate::errors::{ResolveError, Result};
use crate::manifest::FeatureSet;
use crate::version::{is_covered, FeatureVersion};
use std::iter::FusedIterator;
use tracing::{debug, instrument, warn};

/// What to do when the target is not declared in the manifest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MembershipPolicy {
    /// Fail with [`ResolveError::TargetNotFound`]
    #[default]
    Strict,
    /// Enable the declared versions preceding the target and append it
    Permissive,
}

/// Which order the catalog is walked in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeatureOrder {
    /// Declaration order in the manifest
    #[default]
    Manifest,
    /// Structural `major`, `minor`, `suffix` order; only versions sorting at
    /// or below the target are enabled
    Version,
}

/// Options for [`resolve_features`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub policy: MembershipPolicy,
    pub order: FeatureOrder,
}

/// Iterator returned by [`cumulative_features`]
#[derive(Debug, Clone)]
pub struct CumulativeFeatures<'a, I> {
    available: I,
    target: &'a FeatureVersion,
    finished: bool,
}

impl<'a, I> Iterator for CumulativeFeatures<'a, I>
where
    I: Iterator<Item = &'a FeatureVersion>,
{
    type Item = &'a FeatureVersion;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.available.next() {
            Some(version) if version == self.target => {
                self.finished = true;
                Some(version)
            }
            Some(version) => Some(version),
            None => {
                self.finished = true;
                Some(self.target)
            }
        }
    }
}

impl<'a, I> FusedIterator for CumulativeFeatures<'a, I> where
    I: Iterator<Item = &'a FeatureVersion>
{
}

/// Lazily yield every available version up to and including `target`
///
/// If `target` never appears, every available version is yielded followed by
/// `target` itself.
///
/// ```rust
/// use vtest_core::resolve::cumulative_features;
/// use vtest_core::version::FeatureVersion;
///
/// let available: Vec<FeatureVersion> = ["v0-1", "v0-2", "v1-0"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let target: FeatureVersion = "v0-2".parse().unwrap();
/// let names: Vec<&str> = cumulative_features(&available, &target)
///     .map(|v| v.as_str())
///     .collect();
/// assert_eq!(names, vec!["v0-1", "v0-2"]);
/// ```
pub fn cumulative_features<'a, I>(
    available: I,
    target: &'a FeatureVersion,
) -> CumulativeFeatures<'a, I::IntoIter>
where
    I: IntoIterator<Item = &'a FeatureVersion>,
{
    CumulativeFeatures {
        available: available.into_iter(),
        target,
        finished: false,
    }
}

/// Compute the versions to enable for `target` under the given options
#[instrument(skip(available), fields(available = available.len()))]
pub fn resolve_features(
    available: &FeatureSet,
    target: &FeatureVersion,
    options: ResolveOptions,
) -> Result<Vec<FeatureVersion>> {
    if !available.contains(target) {
        let between = is_covered(target, available.as_slice());
        match options.policy {
            MembershipPolicy::Strict => {
                debug!(covered = between, "Target not declared in manifest");
                let listed = if available.is_empty() {
                    "none".to_string()
                } else {
                    available.names().join(", ")
                };
                return Err(ResolveError::TargetNotFound {
                    target: target.to_string(),
                    available: listed,
                }
                .into());
            }
            MembershipPolicy::Permissive => {
                warn!(
                    covered = between,
                    "{} is not declared in the manifest; enabling all declared versions plus the target",
                    target
                );
            }
        }
    }

    let catalog = match options.order {
        FeatureOrder::Manifest => available.clone(),
        FeatureOrder::Version => FeatureSet::new(
            available
                .sorted()
                .iter()
                .filter(|version| *version <= target)
                .cloned()
                .collect(),
        ),
    };

    let features: Vec<FeatureVersion> =
        cumulative_features(&catalog, target).cloned().collect();
    debug!("Resolved {} features for {}", features.len(), target);
    Ok(features)
}
