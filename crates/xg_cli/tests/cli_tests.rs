//! End-to-end tests for the `xg` binary (spec §8 scenario 6, exercised
//! through the CLI surface rather than the library API), grounded on
//! `vm_cli`'s `assert_cmd` + `predicates` test style.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn write_manifest(dir: &std::path::Path) -> std::path::PathBuf {
    let manifest = r#"{
        "options": [
            {"name": "label", "description": "context label", "value_type": "Str", "belonging": "UnderTest"}
        ],
        "candidates": {
            "under_test": {"label": ["a", "b"]}
        },
        "program": {
            "path": "sh",
            "args": ["-c", "echo x,metric > {label}.csv; echo 0,1 >> {label}.csv"]
        },
        "output": {
            "path": "results",
            "data_type": "csv",
            "name_template": "{label}",
            "local_file_template": "{label}.csv"
        }
    }"#;
    let path = dir.join("manifest.json");
    fs::write(&path, manifest).unwrap();
    path
}

#[test]
fn run_drives_every_enumerated_context_and_archives_its_artifact() {
    let work = tempdir().unwrap();
    let manifest_path = write_manifest(work.path());
    let out_dir = work.path().join("store");

    let mut cmd = Command::cargo_bin("xg").unwrap();
    cmd.current_dir(work.path())
        .arg("--manifest")
        .arg(&manifest_path)
        .arg("--out")
        .arg(&out_dir)
        .arg("--quiet");
    cmd.assert().success();

    assert!(out_dir.join("results").join("a.csv").is_file());
    assert!(out_dir.join("results").join("b.csv").is_file());
}

#[test]
fn rerun_skips_already_archived_contexts_and_reports_the_run() {
    let work = tempdir().unwrap();
    let manifest_path = write_manifest(work.path());
    let out_dir = work.path().join("store");

    let mut first = Command::cargo_bin("xg").unwrap();
    first.current_dir(work.path()).arg("--manifest").arg(&manifest_path).arg("--out").arg(&out_dir);
    first.assert().success().stdout(predicate::str::contains("xg: completed=2 failed=0 skipped=0"));

    let mut second = Command::cargo_bin("xg").unwrap();
    second.current_dir(work.path()).arg("--manifest").arg(&manifest_path).arg("--out").arg(&out_dir);
    second.assert().success().stdout(predicate::str::contains("xg: completed=0 failed=0 skipped=2"));
}

#[test]
fn missing_manifest_is_a_clean_error_exit() {
    let mut cmd = Command::cargo_bin("xg").unwrap();
    cmd.arg("--manifest").arg("/no/such/manifest.json");
    cmd.assert().failure().stderr(predicate::str::contains("xg: error:"));
}

#[test]
fn a_failing_external_program_stops_the_run_by_default() {
    let work = tempdir().unwrap();
    let manifest = r#"{
        "options": [
            {"name": "label", "description": "", "value_type": "Str", "belonging": "UnderTest"}
        ],
        "candidates": {"under_test": {"label": ["a"]}},
        "program": {"path": "sh", "args": ["-c", "exit 3"]},
        "output": {"path": "results", "data_type": "csv", "name_template": "{label}", "local_file_template": "{label}.csv"}
    }"#;
    let manifest_path = work.path().join("manifest.json");
    fs::write(&manifest_path, manifest).unwrap();
    let out_dir = work.path().join("store");

    let mut cmd = Command::cargo_bin("xg").unwrap();
    cmd.current_dir(work.path()).arg("--manifest").arg(&manifest_path).arg("--out").arg(&out_dir);
    cmd.assert().failure().stderr(predicate::str::contains("external program failed"));
}
