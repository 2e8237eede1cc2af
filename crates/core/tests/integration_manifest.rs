//! Integration tests for manifest scanning against files on disk

mod common;

use common::{fixture_manifest, temp_manifest};
use vtest_core::errors::{ManifestError, VtestError};
use vtest_core::manifest::list_available_features;

#[test]
fn test_basic_fixture_in_file_order() {
    let set = list_available_features(&fixture_manifest("basic")).unwrap();
    assert_eq!(set.names(), vec!["v0-1", "v0-2", "v1-0"]);
}

#[test]
fn test_unsorted_fixture_stops_at_default() {
    let set = list_available_features(&fixture_manifest("unsorted")).unwrap();
    assert_eq!(set.names(), vec!["v1-10", "v0-2", "v1-2beta", "v1-2"]);
    assert_eq!(
        set.sorted().names(),
        vec!["v0-2", "v1-2", "v1-2beta", "v1-10"]
    );
}

#[test]
fn test_blank_line_after_marker_yields_empty_set() {
    let set = list_available_features(&fixture_manifest("empty-section")).unwrap();
    assert!(set.is_empty());
}

#[test]
fn test_manifest_without_feature_section() {
    let set = list_available_features(&fixture_manifest("no-features")).unwrap();
    assert!(set.is_empty());
}

#[test]
fn test_manifest_is_read_fresh_each_time() {
    let (_dir, path) = temp_manifest("[features]\nv0-1 = []\n");
    assert_eq!(list_available_features(&path).unwrap().names(), vec!["v0-1"]);

    std::fs::write(&path, "[features]\nv0-1 = []\nv0-2 = []\n").unwrap();
    assert_eq!(
        list_available_features(&path).unwrap().names(),
        vec!["v0-1", "v0-2"]
    );
}

#[test]
fn test_missing_manifest_reports_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("Cargo.toml");
    let err = list_available_features(&path).unwrap_err();
    match &err {
        VtestError::Manifest(ManifestError::NotFound { path: reported }) => {
            assert_eq!(reported, &path);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("Manifest file not found:"));
}

#[test]
fn test_directory_instead_of_file_is_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = list_available_features(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        VtestError::Manifest(ManifestError::Io { .. })
    ));
}
