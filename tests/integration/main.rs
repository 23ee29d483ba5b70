//! Integration tests for the docspell CLI
//!
//! These tests drive the real binary against scratch projects, substituting
//! small shell scripts for the external spelling engine so every pipeline
//! behavior is observable without aspell installed.


// Common test utilities
#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use common::fixtures::write_config;

/// Helper function to create a docspell command
fn docspell() -> assert_cmd::Command {
    assert_cmd::Command::new(cargo::cargo_bin!("docspell"))
}

#[test]
fn list_excludes_contributor_listings() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "aspell");
    fs::write(temp.path().join("x.pod6"), "=begin pod\n=end pod\n").unwrap();
    fs::write(temp.path().join("y.md"), "# heading\n").unwrap();
    fs::write(temp.path().join("contributors.pod6"), "names\n").unwrap();

    docspell()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("x.pod6"))
        .stdout(predicate::str::contains("y.md"))
        .stdout(predicate::str::contains("2 candidate file(s)"))
        .stdout(predicate::str::contains("contributors").not());
}

#[test]
fn list_reports_detected_formats() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "aspell");
    fs::write(temp.path().join("guide.md"), "# guide\n").unwrap();
    fs::write(temp.path().join("notes.txt"), "notes\n").unwrap();

    docspell()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("guide.md (markup)"))
        .stdout(predicate::str::contains("notes.txt (plain)"));
}

#[test]
fn list_json_is_machine_readable() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "aspell");
    fs::write(temp.path().join("guide.md"), "# guide\n").unwrap();

    let assert = docspell().args(["--json", "list"]).current_dir(temp.path()).assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed[0]["file"], "guide.md");
    assert_eq!(parsed[0]["kind"], "markup");
}

#[test]
fn dict_writes_session_dictionary() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "aspell");

    docspell()
        .arg("dict")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Session dictionary written to"));

    let dict = temp.path().join(".docspell/session.pws");
    let content = fs::read_to_string(dict).unwrap();
    assert!(content.starts_with("personal_ws-1.1 en 0 utf-8"));
}
