use super::{write_file, BENCH_LOG};
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_cli_show_prints_tables() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_file(temp_dir.path(), "bench.log", BENCH_LOG);

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("show").arg(&log).arg("--user-name").arg("Robin");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Robin (1)"))
        .stdout(predicate::str::contains("Ex1: Bench Press"))
        .stdout(predicate::str::contains("myo(3, 2+1)"))
        .stdout(predicate::str::contains("perfect"));
}

#[test]
fn test_cli_show_reports_syntax_error() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_file(
        temp_dir.path(),
        "bench.log",
        &BENCH_LOG.replace("failure:myo(3,2+1)", "failure:superset(2)"),
    );

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("show").arg(&log);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Syntax error"))
        .stderr(predicate::str::contains("unknown failure technique 'superset'"));
}
