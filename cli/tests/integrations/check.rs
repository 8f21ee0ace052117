use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_check_prints_canonical_form() {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("check").arg(r#"amount > 1000 AND country == "UK""#);

    cmd.assert()
        .success()
        .stdout("amount > 1000 AND country == UK\n");
}

#[test]
fn test_check_json_tree() {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("check").arg("a > 1 OR b < 2").arg("--json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "logical""#))
        .stdout(predicate::str::contains(r#""operator": "or""#))
        .stdout(predicate::str::contains(r#""field": "a""#));
}

#[test]
fn test_check_reports_syntax_error() {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("check").arg("amount >");

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Syntax error"))
        .stderr(predicate::str::contains("Incomplete clause"));
}

#[test]
fn test_check_suggests_upper_case_connector() {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("check").arg("a > 1 and b > 2");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unexpected connector: 'and'"))
        .stderr(predicate::str::contains("connectors are upper case: 'AND'"));
}

#[test]
fn test_eval_true_and_false() {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("eval")
        .arg("amount > 1000 AND country == UK")
        .arg("amount=1200")
        .arg("country=UK");
    cmd.assert().success().stdout("true\n");

    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("eval")
        .arg("amount > 1000 AND country == UK")
        .arg("amount=900")
        .arg("country=UK");
    cmd.assert().success().stdout("false\n");
}

#[test]
fn test_eval_missing_field_defaults() {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("eval").arg("missing < 1");

    cmd.assert().success().stdout("true\n");
}

#[test]
fn test_eval_trace_shows_short_circuit() {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("eval")
        .arg("amount > 1000 AND country == UK")
        .arg("amount=900")
        .arg("--trace");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("amount > 1000 (amount is 900) → false"))
        .stdout(predicate::str::contains("AND right side skipped"))
        .stdout(predicate::str::contains("country").not());
}

#[test]
fn test_eval_json_output() {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("eval")
        .arg("score > 10 OR tier == gold")
        .arg("score=11")
        .arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["matched"], true);
    assert_eq!(json["rule"], "score > 10 OR tier == gold");
    assert_eq!(json["operations"][0]["type"], "clause");
    assert_eq!(json["operations"][1]["type"], "short_circuit");
}

#[test]
fn test_eval_numeric_fact_needs_quotes_for_equality() {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("eval").arg("mcc == 5411").arg("mcc=5411");
    cmd.assert().success().stdout("false\n");

    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("eval").arg("mcc == 5411").arg(r#"mcc="5411""#);
    cmd.assert().success().stdout("true\n");
}

#[test]
fn test_eval_help_explains_quoted_facts() {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("eval").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"'mcc="5411"'"#));
}

#[test]
fn test_eval_rejects_malformed_fact() {
    let mut cmd = Command::cargo_bin("verdict").unwrap();
    cmd.arg("eval").arg("amount > 1").arg("amount");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("expected name=value"));
}
