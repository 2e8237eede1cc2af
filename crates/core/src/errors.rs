//! Error types and handling
//!
//! The error taxonomy has one enum per domain (manifest access, version
//! validation, feature resolution, test invocation) wrapped in the main
//! [`VtestError`] enum for unified handling at the CLI boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Manifest access errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file does not exist
    #[error("Manifest file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Manifest file exists but could not be read
    #[error("Failed to read manifest file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Version identifier errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Identifier does not match `v<major>-<minor>[suffix]`
    #[error("{input} is not a valid version")]
    InvalidFormat { input: String },
}

/// Feature resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Target is not declared in the manifest feature list
    #[error("{target} is not declared in the manifest (available: {available})")]
    TargetNotFound { target: String, available: String },
}

/// External test invocation errors
#[derive(Error, Debug)]
pub enum InvocationError {
    /// Test command could not be started
    #[error("Failed to spawn test command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Test command ran and returned a non-zero status
    #[error("test failed (exit code {code})")]
    Failed { code: i32 },
}

/// Main error enum wrapping all domain-specific errors
#[derive(Error, Debug)]
pub enum VtestError {
    /// Invocation was missing required input
    #[error("{0}")]
    Usage(String),

    /// Manifest access errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Version validation errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Resolution errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Test invocation errors
    #[error(transparent)]
    Invocation(#[from] InvocationError),
}

/// Convenience type alias for Results with VtestError
pub type Result<T> = std::result::Result<T, VtestError>;
