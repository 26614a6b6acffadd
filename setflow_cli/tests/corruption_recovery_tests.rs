//! Corruption recovery tests for setflow.
//!
//! These tests verify the system can handle:
//! - Corrupted WAL files
//! - Partial writes (crash mid-append)
//! - Missing files

use assert_cmd::Command;
use std::fs;
use std::io::Write as IoWrite;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("setflow"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_corrupted_wal_lines_ignored_during_read() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    fs::create_dir_all(data_dir.join("wal")).unwrap();

    let wal_path = data_dir.join("wal/logged_sets.wal");
    fs::write(&wal_path, "{ invalid json }\n{ more invalid }\n")
        .expect("Failed to write corrupted WAL");

    // Stats still computes (corrupted lines are logged as warnings)
    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success();
}

#[test]
fn test_partial_wal_line() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Simulate a crash during append: one valid line, one truncated
    fs::create_dir_all(data_dir.join("wal")).unwrap();
    let wal_path = data_dir.join("wal/logged_sets.wal");

    let mut file = fs::File::create(&wal_path).unwrap();
    writeln!(
        file,
        r#"{{"id":"00000000-0000-0000-0000-000000000001","user_id":1,"exercise_id":1,"date":"2026-08-20","sets_done":1,"reps_done":10,"weight_used":60.0,"rpe":7}}"#
    )
    .unwrap();
    write!(file, r#"{{"id":"00000000-0000-0000-0000-0000000"#).unwrap();
    drop(file);

    // The valid line survives, the truncated one is skipped
    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicates::str::contains("Total sets:     1"));
}

#[test]
fn test_missing_data_dir() {
    let temp_dir = setup_test_dir();
    let missing = temp_dir.path().join("does-not-exist-yet");

    // Nothing on disk; every command still behaves
    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(&missing)
        .assert()
        .success();

    cli()
        .arg("workout")
        .arg("--data-dir")
        .arg(&missing)
        .arg("--day")
        .arg("monday")
        .arg("--auto-complete")
        .assert()
        .success();
}

#[test]
fn test_wal_survives_corrupt_append_neighbors() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Log a real workout, then corrupt the WAL with a garbage line
    cli()
        .arg("workout")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--day")
        .arg("saturday")
        .arg("--auto-complete")
        .assert()
        .success();

    let wal_path = data_dir.join("wal/logged_sets.wal");
    let mut file = fs::OpenOptions::new().append(true).open(&wal_path).unwrap();
    writeln!(file, "not json at all").unwrap();
    drop(file);

    // Leg day logged 4 sets; the garbage line is skipped
    cli()
        .arg("stats")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicates::str::contains("Total sets:     4"));
}
