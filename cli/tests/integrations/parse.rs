use super::{write_file, BENCH_LOG};
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_cli_parse_prints_canonical_json() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_file(temp_dir.path(), "bench.log", BENCH_LOG);

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("parse").arg(&log);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"_id\": \"2025-10-18_upper_1\""))
        .stdout(predicate::str::contains("\"type\": \"MyoReps\""))
        .stdout(predicate::str::contains("\"program_length_weeks\": 12"));
}

#[test]
fn test_cli_parse_compact() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_file(temp_dir.path(), "bench.log", BENCH_LOG);

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("parse").arg(&log).arg("--compact");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"focus\":\"Upper\""))
        .stdout(predicate::str::contains("\n  ").not());
}

#[test]
fn test_cli_parse_applies_defaults_from_flags_and_env() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_file(temp_dir.path(), "bench.log", BENCH_LOG);

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("parse")
        .arg(&log)
        .arg("--user")
        .arg("sam")
        .env("TRAININGLOG_PROGRAM", "Upper Lower")
        .env("TRAININGLOG_PROGRAM_LENGTH", "8");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"_id\": \"2025-10-18_upper_sam\""))
        .stdout(predicate::str::contains("\"program\": \"Upper Lower\""))
        .stdout(predicate::str::contains("\"program_length_weeks\": 8"));
}

#[test]
fn test_cli_parse_week_outside_program_fails() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_file(temp_dir.path(), "bench.log", BENCH_LOG);

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("parse").arg(&log).arg("--program-length").arg("2");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Validation error: field 'week'"));
}

#[test]
fn test_cli_parse_reports_line_of_set_before_exercise() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_file(
        temp_dir.path(),
        "broken.log",
        "BEGIN\nDate: 2025-10-18\nS1: 60x6 RPE8\nEx1: Bench Press\nEND\n",
    );

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("parse").arg(&log);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Lexical error"))
        .stderr(predicate::str::contains("before any exercise header"))
        .stderr(predicate::str::contains("broken.log:3"));
}

#[test]
fn test_cli_parse_without_markers_fails() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_file(temp_dir.path(), "notes.txt", "rest day, walked 5km\n");

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("parse").arg(&log);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no BEGIN/END block"));
}

#[test]
fn test_cli_parse_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("parse").arg(temp_dir.path().join("missing.log"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
