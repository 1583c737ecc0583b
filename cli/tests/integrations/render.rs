use super::{write_file, BENCH_LOG};
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_cli_render_round_trips_through_json() {
    let temp_dir = TempDir::new().unwrap();
    let log = write_file(temp_dir.path(), "bench.log", BENCH_LOG);

    let output = Command::cargo_bin("traininglog")
        .unwrap()
        .arg("parse")
        .arg(&log)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = write_file(
        temp_dir.path(),
        "bench.json",
        &String::from_utf8(output.stdout).unwrap(),
    );

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("render").arg(&json);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("BEGIN:\n"))
        .stdout(predicate::str::contains("S2: 60x6 RPE 10 perfect failure:myo(3, 2+1)"))
        .stdout(predicate::str::ends_with("END\n"));
}

#[test]
fn test_cli_render_rejects_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let json = write_file(temp_dir.path(), "broken.json", "{\"phase\": 1}");

    let mut cmd = Command::cargo_bin("traininglog").unwrap();
    cmd.arg("render").arg(&json);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Canonical form error"));
}
