use assert_cmd::Command;
use predicates::prelude::*;
use tracing::info;

#[test]
fn test_help_command() {
    stepview_common::logging::ensure_test_logging(None);
    info!("Testing CLI help command");

    let mut cmd = Command::cargo_bin("stepview").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Step-through debugger client"))
        .stdout(predicate::str::contains("trace"));
}

#[test]
fn test_version_command() {
    stepview_common::logging::ensure_test_logging(None);
    info!("Running test");
    let mut cmd = Command::cargo_bin("stepview").unwrap();
    cmd.arg("--version").assert().success().stdout(predicate::str::contains("stepview"));
}

#[test]
fn test_trace_subcommand_help() {
    stepview_common::logging::ensure_test_logging(None);
    info!("Running test");
    let mut cmd = Command::cargo_bin("stepview").unwrap();
    cmd.arg("trace")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--max-steps"))
        .stdout(predicate::str::contains("--run-to-end"));
}

#[test]
fn test_missing_config_file_fails() {
    stepview_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("stepview").unwrap();
    cmd.arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("trace")
        .assert()
        .failure();
}

#[test]
fn test_trace_against_unreachable_backend_fails() {
    stepview_common::logging::ensure_test_logging(None);
    info!("Running test");
    let mut cmd = Command::cargo_bin("stepview").unwrap();
    cmd.args(["--url", "http://127.0.0.1:9", "trace", "byteshow"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error:"));
}
