//! Corruption recovery tests for the liftplan binary.
//!
//! These tests verify the plan library handles:
//! - Corrupted library files
//! - Missing files and directories
//! - Truncated writes, kept aside rather than overwritten

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("liftplan"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn save_plan(data_dir: &std::path::Path, seed: &str) {
    cli()
        .arg("generate")
        .args(["--goal", "endurance", "--level", "novice", "--days", "2"])
        .args(["--age", "45", "--muscles", "chest,quads", "--equipment", "bodyweight"])
        .args(["--seed", seed, "--save", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();
}

/// Files the library was moved to after failing to parse
fn backups(data_dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    fs::read_dir(data_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.to_string_lossy().contains("plans.json.corrupt-"))
        .collect()
}

#[test]
fn test_corrupted_library_lists_empty() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(data_dir.join("plans.json"), "{ invalid json }}}}").unwrap();

    cli()
        .args(["list", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved plans."));
}

#[test]
fn test_save_replaces_corrupted_library() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(data_dir.join("plans.json"), "not json at all").unwrap();
    save_plan(data_dir, "1");

    let content = fs::read_to_string(data_dir.join("plans.json")).unwrap();
    let library: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(library["plans"].as_object().unwrap().len(), 1);

    let backups = backups(data_dir);
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "not json at all");
}

#[test]
fn test_truncated_library_recovers() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    save_plan(data_dir, "1");
    let path = data_dir.join("plans.json");
    let content = fs::read_to_string(&path).unwrap();
    fs::write(&path, &content.as_bytes()[..content.len() / 2]).unwrap();

    // Reads degrade to an empty library rather than failing
    cli()
        .args(["list", "--data-dir"])
        .arg(data_dir)
        .assert()
        .success();

    save_plan(data_dir, "2");
    let library: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(library["plans"].as_object().unwrap().len(), 1);

    // The truncated library is kept next to the new one
    let backups = backups(data_dir);
    assert_eq!(backups.len(), 1);
    assert_eq!(
        fs::read(&backups[0]).unwrap(),
        &content.as_bytes()[..content.len() / 2]
    );
}

#[test]
fn test_missing_data_dir_is_created_on_save() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("does").join("not").join("exist");

    cli()
        .args(["list", "--data-dir"])
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved plans."));

    save_plan(&data_dir, "3");
    assert!(data_dir.join("plans.json").exists());
}

#[test]
fn test_unknown_id_fails_cleanly() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["delete", "00000000-0000-4000-8000-000000000000", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("PlanNotFound"));

    cli()
        .args(["show", "not-a-uuid", "--data-dir"])
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_hand_edited_rest_days_still_show() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    save_plan(data_dir, "4");
    let path = data_dir.join("plans.json");
    let mut library: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let (id, stored) = library["plans"]
        .as_object_mut()
        .unwrap()
        .iter_mut()
        .next()
        .unwrap();
    let id = id.clone();
    stored["plan"]["rest_days"] = serde_json::json!(9);
    fs::write(&path, serde_json::to_string(&library).unwrap()).unwrap();

    cli()
        .args(["show", id.as_str(), "--data-dir"])
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 training day(s), 9 rest day(s)"));
}
