use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn workspace() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("orders.rules"),
        r#"
# Order screening
high_value: amount > 1000 AND country == UK
tiny: amount < 10
"#,
    )
    .unwrap();
    fs::create_dir(temp_dir.path().join("users")).unwrap();
    fs::write(
        temp_dir.path().join("users").join("admins.rules"),
        "is_admin: role == admin\n",
    )
    .unwrap();
    temp_dir
}

#[test]
fn test_cli_run_all_rules_raw() {
    let temp_dir = workspace();

    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("run")
        .arg("amount=1200")
        .arg("country=UK")
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--raw");

    cmd.assert()
        .success()
        .stdout("high_value=true\ntiny=false\nis_admin=false\n");
}

#[test]
fn test_cli_run_selected_rules() {
    let temp_dir = workspace();

    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("run")
        .arg("tiny,is_admin")
        .arg("amount=5")
        .arg("role=admin")
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--raw");

    cmd.assert().success().stdout("tiny=true\nis_admin=true\n");
}

#[test]
fn test_cli_run_table_output() {
    let temp_dir = workspace();

    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("run")
        .arg("high_value")
        .arg("amount=1500")
        .arg("country=UK")
        .arg("--dir")
        .arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("high_value = true"))
        .stdout(predicate::str::contains("country == \"UK\" (country is \"UK\") → true"));
}

#[test]
fn test_cli_run_unknown_rule() {
    let temp_dir = workspace();

    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("run")
        .arg("nope")
        .arg("--dir")
        .arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Rule 'nope' not found"));
}

#[test]
fn test_cli_run_json_output() {
    let temp_dir = workspace();

    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("run")
        .arg("is_admin")
        .arg("role=admin")
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["results"][0]["rule"]["name"], "is_admin");
    assert_eq!(json["results"][0]["matched"], true);
}

#[test]
fn test_cli_run_reports_rule_file_errors() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("bad.rules"),
        "ok: a > 1\nbroken: a >= 1\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("run").arg("--dir").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unexpected operator: '>='"))
        .stderr(predicate::str::contains("bad.rules:2:11"));
}

#[test]
fn test_cli_list_rules() {
    let temp_dir = workspace();

    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("list").arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Workspace contains 2 files, 3 rules"))
        .stdout(predicate::str::contains("high_value"))
        .stdout(predicate::str::contains("role == admin"));
}

#[test]
fn test_cli_list_empty_workspace() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("list").arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Workspace contains 0 files, 0 rules"));
}
