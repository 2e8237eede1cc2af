//! Shared test utilities for vtest CLI tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Repository root (`crates/vtest` is two levels down)
pub fn repo_root() -> PathBuf {
    let here = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    here.parent()
        .and_then(|p| p.parent())
        .unwrap_or(&here)
        .to_path_buf()
}

/// Path to `fixtures/manifests/<name>/Cargo.toml`
pub fn fixture_manifest(name: &str) -> PathBuf {
    repo_root()
        .join("fixtures/manifests")
        .join(name)
        .join("Cargo.toml")
}

/// Temporary project directory holding a `Cargo.toml` with `features`
pub fn temp_project(features: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut manifest = String::from("[package]\nname = \"demo\"\nversion = \"0.1.0\"\n\n[features]\n");
    for feature in features {
        manifest.push_str(&format!("{} = []\n", feature));
    }
    std::fs::write(dir.path().join("Cargo.toml"), manifest).expect("Failed to write manifest");
    dir
}

pub fn manifest_in(dir: &Path) -> PathBuf {
    dir.join("Cargo.toml")
}
