//! Run configuration
//!
//! All settings come from the command line; there is no configuration file.
//! Defaults match the historical behavior: `Cargo.toml` in the current
//! directory, `cargo` as the tool, streams inherited.

use crate::manifest::DEFAULT_MANIFEST;
use crate::resolve::ResolveOptions;
use crate::runner::{OutputMode, DEFAULT_TOOL};
use std::path::{Path, PathBuf};

/// Settings for one test run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Manifest to scan for feature versions
    pub manifest_path: PathBuf,
    /// Program invoked as `<tool> test --features ...`
    pub tool: String,
    /// Membership policy and catalog order
    pub resolve: ResolveOptions,
    /// Inherit or capture the test output
    pub output_mode: OutputMode,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST),
            tool: DEFAULT_TOOL.to_string(),
            resolve: ResolveOptions::default(),
            output_mode: OutputMode::default(),
        }
    }
}

impl RunOptions {
    /// Directory the test command runs in: the manifest's parent, if any
    pub fn working_dir(&self) -> Option<&Path> {
        self.manifest_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RunOptions::default();
        assert_eq!(options.manifest_path, PathBuf::from("Cargo.toml"));
        assert_eq!(options.tool, "cargo");
        assert_eq!(options.output_mode, OutputMode::Inherit);
        assert!(options.working_dir().is_none());
    }

    #[test]
    fn test_working_dir_from_manifest_path() {
        let options = RunOptions {
            manifest_path: PathBuf::from("/work/project/Cargo.toml"),
            ..Default::default()
        };
        assert_eq!(options.working_dir(), Some(Path::new("/work/project")));
    }
}
