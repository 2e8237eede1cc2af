//! Runs that spawn a real process. Shell builtins stand in for the build
//! tool so zero and non-zero statuses can be simulated.
#![cfg(unix)]

mod support;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use support::{manifest_in, temp_project};

#[test]
fn test_zero_status_exits_zero() {
    let project = temp_project(&["v0-1", "v0-2"]);
    let mut cmd = Command::cargo_bin("vtest").unwrap();
    cmd.arg("--manifest-path")
        .arg(manifest_in(project.path()))
        .arg("--tool")
        .arg("true")
        .arg("v0-2")
        .assert()
        .success();
}

#[test]
fn test_non_zero_status_exits_one() {
    let project = temp_project(&["v0-1", "v0-2"]);
    let mut cmd = Command::cargo_bin("vtest").unwrap();
    cmd.arg("--manifest-path")
        .arg(manifest_in(project.path()))
        .arg("--tool")
        .arg("exit 7; true")
        .arg("v0-1")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("test failed (exit code 7)"));
}

#[test]
fn test_tool_receives_quoted_feature_list() {
    let project = temp_project(&["v0-1", "v0-2", "v1-0"]);
    let mut cmd = Command::cargo_bin("vtest").unwrap();
    cmd.arg("--manifest-path")
        .arg(manifest_in(project.path()))
        .arg("--tool")
        .arg("printf '%s|'")
        .arg("v0-2")
        .assert()
        .success()
        .stdout(predicate::str::contains("test|--features|v0-1 v0-2|"));
}

#[test]
fn test_runs_in_manifest_directory() {
    let project = temp_project(&["v0-1"]);
    let mut cmd = Command::cargo_bin("vtest").unwrap();
    cmd.arg("--manifest-path")
        .arg(manifest_in(project.path()))
        .arg("--tool")
        .arg("touch ran && true")
        .arg("v0-1")
        .assert()
        .success();
    assert!(project.path().join("ran").exists());
}

#[test]
fn test_capture_prints_output_only_on_failure() {
    let project = temp_project(&["v0-1"]);

    let mut cmd = Command::cargo_bin("vtest").unwrap();
    cmd.arg("--manifest-path")
        .arg(manifest_in(project.path()))
        .arg("--capture")
        .arg("--tool")
        .arg("echo quiet-pass; true")
        .arg("v0-1")
        .assert()
        .success()
        .stdout(predicate::str::contains("quiet-pass").not());

    let mut cmd = Command::cargo_bin("vtest").unwrap();
    cmd.arg("--manifest-path")
        .arg(manifest_in(project.path()))
        .arg("--capture")
        .arg("--tool")
        .arg("echo loud-fail; false")
        .arg("v0-1")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("loud-fail"))
        .stdout(predicate::str::contains("test failed (exit code 1)"));
}

#[test]
fn test_json_summary() {
    let project = temp_project(&["v0-1", "v0-2"]);
    let mut cmd = Command::cargo_bin("vtest").unwrap();
    let assert = cmd
        .arg("--manifest-path")
        .arg(manifest_in(project.path()))
        .arg("--capture")
        .arg("--output")
        .arg("json")
        .arg("--tool")
        .arg("true")
        .arg("v0-2")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let summary: Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    assert_eq!(summary["target"], "v0-2");
    assert_eq!(summary["features"], serde_json::json!(["v0-1", "v0-2"]));
    assert_eq!(summary["command"], "true test --features 'v0-1 v0-2'");
    assert_eq!(summary["dryRun"], false);
    assert_eq!(summary["result"]["code"], 0);
    assert_eq!(summary["result"]["success"], true);
    assert_eq!(summary["result"]["output"], "");
}
