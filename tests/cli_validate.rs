use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// CLI-level tests exercising the celcheck binary end to end.

fn celcheck() -> Command {
    Command::cargo_bin("celcheck").unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.display().to_string()
}

const DEPLOYMENT: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
spec:
  replicas: 5
"#;

#[test]
fn test_passing_inline_expression_exits_zero() {
    let dir = TempDir::new().unwrap();
    let manifest = write(&dir, "deploy.yaml", DEPLOYMENT);

    celcheck()
        .args(["validate", &manifest, "--expression", "object.spec.replicas >= 3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All 1 checks passed."));
}

#[test]
fn test_failing_inline_expression_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let manifest = write(&dir, "deploy.yaml", DEPLOYMENT);

    celcheck()
        .args([
            "validate",
            &manifest,
            "--expression",
            "object.spec.replicas >= 10",
            "--message",
            "need ten replicas",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("1/1 checks failed (100.0% failure rate)"))
        .stdout(predicate::str::contains("need ten replicas"));
}

#[test]
fn test_no_fail_flag_forces_zero_exit() {
    let dir = TempDir::new().unwrap();
    let manifest = write(&dir, "deploy.yaml", DEPLOYMENT);

    celcheck()
        .args([
            "validate",
            &manifest,
            "--expression",
            "false",
            "--no-fail",
        ])
        .assert()
        .success();
}

#[test]
fn test_compile_error_produces_no_results() {
    let dir = TempDir::new().unwrap();
    let manifest = write(&dir, "deploy.yaml", DEPLOYMENT);

    celcheck()
        .args([
            "validate",
            &manifest,
            "--expression",
            "this is not valid CEL",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rule compilation failed"))
        .stdout(predicate::str::contains("checks").not());
}

#[test]
fn test_rule_file_with_target() {
    let dir = TempDir::new().unwrap();
    let manifest = write(
        &dir,
        "all.yaml",
        "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\nspec:\n  replicas: 1\n---\napiVersion: v1\nkind: Service\nmetadata:\n  name: web\n",
    );
    let rules = write(
        &dir,
        "rules.yaml",
        r#"
name: capacity
rules:
  - name: minimum-replicas
    expression: object.spec.replicas >= 3
    message: at least 3 replicas required
    target:
      kind: Deployment
"#,
    );

    celcheck()
        .args(["validate", &manifest, "--rules", &rules])
        .assert()
        .failure()
        .stdout(predicate::str::contains("minimum-replicas (Deployment/web)"))
        .stdout(predicate::str::contains("1/1 checks failed"));
}

#[test]
fn test_verbose_reports_passes() {
    let dir = TempDir::new().unwrap();
    let manifest = write(&dir, "deploy.yaml", DEPLOYMENT);

    celcheck()
        .args(["validate", &manifest, "--expression", "true", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"))
        .stdout(predicate::str::contains("inline (Deployment/web)"));
}

#[test]
fn test_json_format() {
    let dir = TempDir::new().unwrap();
    let manifest = write(&dir, "deploy.yaml", DEPLOYMENT);

    let output = celcheck()
        .args([
            "validate",
            &manifest,
            "--expression",
            "object.spec.replicas >= 3",
            "--format",
            "json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["summary"]["total"], 1);
    assert_eq!(parsed["summary"]["passed"], true);
    assert_eq!(parsed["results"][0]["ruleName"], "inline");
}

#[test]
fn test_rules_subcommand_lists_without_evaluating() {
    let dir = TempDir::new().unwrap();
    let rules = write(
        &dir,
        "rules.yaml",
        r#"
name: listing
rules:
  - name: first
    expression: "true"
    message: always passes
  - name: second
    expression: "false"
    target:
      kind: Pod
"#,
    );

    celcheck()
        .args(["rules", &rules])
        .assert()
        .success()
        .stdout(predicate::str::contains("listing (2 rules)"))
        .stdout(predicate::str::contains("first"))
        .stdout(predicate::str::contains("second [kind=Pod]"));
}

#[test]
fn test_missing_rules_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let manifest = write(&dir, "deploy.yaml", DEPLOYMENT);

    celcheck()
        .args(["validate", &manifest])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no rules supplied"));
}
