//! Binary-level tests for the jobdash CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::net::TcpListener;
use tempfile::TempDir;

/// Command isolated from the user's config files and environment
fn jobdash(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jobdash").unwrap();
    cmd.current_dir(home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path())
        .env_remove("JOBDASH_BASE_URL")
        .env_remove("JOBDASH_TIMEOUT_MS")
        .env_remove("JOBDASH_STATUS_INTERVAL_MS")
        .env_remove("JOBDASH_STATS_INTERVAL_MS");
    cmd
}

/// Origin nothing listens on
fn closed_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    jobdash(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("health"))
        .stdout(predicate::str::contains("jobs"))
        .stdout(predicate::str::contains("download"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn test_health_against_unreachable_backend_fails() {
    let home = TempDir::new().unwrap();
    jobdash(&home)
        .args(["--base-url", &closed_origin(), "--timeout-ms", "500", "health"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Status: error"))
        .stderr(predicate::str::contains("Backend is not healthy"));
}

#[test]
fn test_invalid_timeout_env_is_reported() {
    let home = TempDir::new().unwrap();
    jobdash(&home)
        .env("JOBDASH_TIMEOUT_MS", "soon")
        .arg("health")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JOBDASH_TIMEOUT_MS"));
}

#[test]
fn test_project_config_file_is_used() {
    let home = TempDir::new().unwrap();
    let config = format!(r#"{{"base_url": "{}", "request_timeout_ms": 500}}"#, closed_origin());
    std::fs::write(home.path().join("jobdash.json"), config).unwrap();

    jobdash(&home)
        .arg("health")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Network error"));
}

#[test]
fn test_download_requires_numeric_id() {
    let home = TempDir::new().unwrap();
    jobdash(&home)
        .args(["download", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
