//! Shared test helpers for core integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// Path to a manifest under `fixtures/manifests/<name>/Cargo.toml`
pub fn fixture_manifest(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/manifests")
        .join(name)
        .join("Cargo.toml")
}

/// Write `contents` to a `Cargo.toml` in a fresh temporary directory
pub fn temp_manifest(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("Cargo.toml");
    std::fs::write(&path, contents).expect("Failed to write manifest");
    (dir, path)
}
