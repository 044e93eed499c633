//! Command-line tests for the `geoportal-dcat` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn dcat() -> Command {
    let mut cmd = Command::cargo_bin("geoportal-dcat").unwrap();
    cmd.env_remove("DCAT_CACHE_DIR").env_remove("DCAT_DEFAULTS_FILE");
    cmd
}

#[test]
fn test_convert_to_stdout() {
    let output = dcat()
        .arg("convert")
        .arg(fixture_path("search_page.json"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let catalog: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(catalog["@type"], "dcat:Catalog");
    assert_eq!(catalog["dataset"][0]["identifier"], "x1");
}

#[test]
fn test_convert_from_stdin_compact() {
    dcat()
        .args(["convert", "-", "--compact"])
        .write_stdin(r#"{"items": [{"id": "s1"}], "totalHits": 1, "itemsPerPage": 5}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""identifier":"s1""#));
}

#[test]
fn test_convert_to_file_with_defaults() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("catalog.json");

    dcat()
        .arg("convert")
        .arg(fixture_path("search_page.json"))
        .arg("--output")
        .arg(&output)
        .arg("--defaults")
        .arg(fixture_path("defaults.yaml"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote"));

    let catalog: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(catalog["dataset"][0]["accessLevel"], "restricted public");
}

#[test]
fn test_defaults_from_environment() {
    dcat()
        .env("DCAT_DEFAULTS_FILE", fixture_path("defaults.yaml"))
        .arg("convert")
        .arg(fixture_path("search_page.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Department of Examples"));
}

#[test]
fn test_convert_missing_input() {
    dcat()
        .args(["convert", "/nonexistent/page.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid input"));
}

#[test]
fn test_convert_invalid_json() {
    dcat()
        .args(["convert", "-"])
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON serialization failed"));
}

#[test]
fn test_cache_write_then_show() {
    let temp_dir = tempdir().unwrap();
    let cache_dir = temp_dir.path().join("cache");

    dcat()
        .args(["cache", "write"])
        .arg(fixture_path("search_page.json"))
        .arg("--cache-dir")
        .arg(&cache_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cached to:"));

    let output = dcat()
        .args(["cache", "show", "--cache-dir"])
        .arg(&cache_dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    let catalog: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(catalog["total"], 57);
}

#[test]
fn test_cache_show_empty() {
    let temp_dir = tempdir().unwrap();

    dcat()
        .env("DCAT_CACHE_DIR", temp_dir.path())
        .args(["cache", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No recent DCAT cache found"));
}
