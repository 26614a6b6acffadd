//! Integration tests for the setflow binary.
//!
//! These tests verify end-to-end behavior including:
//! - Guided workout session workflow
//! - Rest-day handling and day overrides
//! - CSV rollup operations
//! - Progress statistics

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("setflow"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Guided workout session tracker"));
}

#[test]
fn test_workout_creates_directories() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("workout")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--day")
        .arg("monday")
        .arg("--auto-complete")
        .assert()
        .success();

    assert!(data_dir.join("wal").exists());
    assert!(data_dir.join("wal/logged_sets.wal").exists());
}

#[test]
fn test_workout_logs_every_set_to_wal() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("workout")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--day")
        .arg("monday")
        .arg("--auto-complete")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout complete!"));

    // Monday is a push day: 4 + 3 + 4 + 3 sets
    let wal_path = data_dir.join("wal/logged_sets.wal");
    let wal_content = fs::read_to_string(&wal_path).expect("Failed to read WAL");
    assert_eq!(wal_content.lines().count(), 14);
    assert!(wal_content.contains("exercise_id"));
}

#[test]
fn test_rest_day_logs_nothing() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("workout")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--day")
        .arg("wednesday")
        .arg("--auto-complete")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest day"));

    assert!(!data_dir.join("wal/logged_sets.wal").exists());
}

#[test]
fn test_unknown_day_falls_back_to_today() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("workout")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--day")
        .arg("someday")
        .arg("--auto-complete")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown day"));
}

#[test]
fn test_workout_shows_session_progress() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("workout")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--day")
        .arg("saturday")
        .arg("--auto-complete")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercise 1 of 1: Squats"))
        .stdout(predicate::str::contains("Set 4 of 4"));
}

#[test]
fn test_repeat_sets_trigger_recommendation() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Auto mode logs RPE 7 for every set, so once two sets of the same
    // exercise exist the average sits at the easy threshold.
    cli()
        .arg("workout")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--day")
        .arg("monday")
        .arg("--auto-complete")
        .assert()
        .success()
        .stdout(predicate::str::contains("increasing reps"));
}

#[test]
fn test_rollup_creates_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("workout")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--day")
        .arg("tuesday")
        .arg("--auto-complete")
        .assert()
        .success();

    cli()
        .arg("rollup")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rolled up 10 sets"));

    let csv_path = data_dir.join("sets.csv");
    assert!(csv_path.exists());
    let csv_content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(csv_content.contains("exercise_id"));

    // WAL was archived, not deleted
    assert!(!data_dir.join("wal/logged_sets.wal").exists());
    assert!(data_dir.join("wal/logged_sets.wal.processed").exists());
}

#[test]
fn test_rollup_cleanup_removes_processed_wals() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("workout")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--day")
        .arg("friday")
        .arg("--auto-complete")
        .assert()
        .success();

    cli()
        .arg("rollup")
        .arg("--cleanup")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaned up 1 processed WAL"));

    assert!(!data_dir.join("wal/logged_sets.wal.processed").exists());
}

#[test]
fn test_rollup_without_wal() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("rollup")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to roll up"));
}

#[test]
fn test_stats_after_workout() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("workout")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--day")
        .arg("monday")
        .arg("--auto-complete")
        .assert()
        .success();

    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total workouts: 1"))
        .stdout(predicate::str::contains("Total sets:     14"))
        .stdout(predicate::str::contains("Current streak: 1"));
}

#[test]
fn test_stats_with_no_history() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total workouts: 0"))
        .stdout(predicate::str::contains("Current streak: 0"));
}

#[test]
fn test_stats_survives_rollup() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("workout")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--day")
        .arg("monday")
        .arg("--auto-complete")
        .assert()
        .success();

    cli()
        .arg("rollup")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();

    // Sets now live in the CSV archive instead of the WAL
    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total sets:     14"));
}
