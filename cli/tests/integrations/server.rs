use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_server_command_available() {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("server"));
}

#[test]
fn test_server_help_lists_options() {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("server").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("--dir"));
}

#[test]
fn test_server_refuses_to_start_with_broken_rules() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("broken.rules"), "bad: amount >\n").unwrap();

    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("server").arg("--dir").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Incomplete clause"));
}
