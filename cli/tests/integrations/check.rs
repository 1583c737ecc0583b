use super::{write_file, BENCH_LOG};
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_check_valid_directory() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "monday.log", BENCH_LOG);
    write_file(temp_dir.path(), "readme.md", "not a log\n");
    fs::create_dir(temp_dir.path().join("older")).unwrap();
    write_file(
        &temp_dir.path().join("older"),
        "friday.txt",
        &BENCH_LOG.replace("Week: 3", "Week: 2"),
    );

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("check").arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("monday.log"))
        .stdout(predicate::str::contains("friday.txt"))
        .stdout(predicate::str::contains("readme.md").not())
        .stdout(predicate::str::contains("2 of 2 file(s) valid"));
}

#[test]
fn test_cli_check_skips_files_without_session() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "monday.log", BENCH_LOG);
    write_file(temp_dir.path(), "plan.txt", "next week: more volume\n");

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("check").arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("skipped"))
        .stdout(predicate::str::contains("1 of 2 file(s) valid"));
}

#[test]
fn test_cli_check_fails_on_invalid_log() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "good.log", BENCH_LOG);
    write_file(
        temp_dir.path(),
        "bad.log",
        &BENCH_LOG.replace("RPE10 perfect", "RPE8 perfect"),
    );

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("check").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("bad.log"))
        .stdout(predicate::str::contains("1 of 2 file(s) valid"))
        .stderr(predicate::str::contains("failure_technique"))
        .stderr(predicate::str::contains("1 of 2 log file(s) failed to parse"));
}
