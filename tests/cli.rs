use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get the session file path in the temp home
fn session_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path()
        .join(".sentiment-dashboard")
        .join("session.json")
}

const BINARY_NAME: &str = "sentiment-dashboard";

/// Points the binary at a port nothing listens on, so no test reaches a real backend.
const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Monitor and control Telegram and email sentiment ingestion"))
        .stdout(contains("dashboard"));
}

#[test]
/// Logout without a stored session should only print a notice.
fn logout_without_session_succeeds() {
    let tmp = temp_home();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("logout")
        .arg("--backend-url")
        .arg(UNREACHABLE_BACKEND)
        .env("HOME", tmp.path())
        .assert()
        .success()
        .stdout(contains("No session found."));

    assert!(!session_file_path(&tmp).exists());
}

#[test]
/// Logout keeps the stored session when the backend cannot be reached.
fn failed_logout_keeps_session() {
    let tmp = temp_home();
    let session_path = session_file_path(&tmp);
    fs::create_dir_all(session_path.parent().unwrap()).unwrap();
    fs::write(
        &session_path,
        r#"{"org_jwt": "jwt", "telegram_phone": "+15550100", "organization_id": "org-7"}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("logout")
        .arg("--backend-url")
        .arg(UNREACHABLE_BACKEND)
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stderr(contains("Logout failed"));

    assert!(session_path.exists());
}

#[test]
/// Upload without a file should warn and never reach the backend.
fn upload_without_file_warns() {
    let tmp = temp_home();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("upload")
        .arg("--file-type")
        .arg("pdf")
        .arg("--backend-url")
        .arg(UNREACHABLE_BACKEND)
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stdout(contains("Please select a file first."));
}

#[test]
/// Task commands require a stored token.
fn task_status_requires_login() {
    let tmp = temp_home();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["chat", "status", "--backend-url", UNREACHABLE_BACKEND])
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stderr(contains("Not logged in"))
        .stdout(contains("sentiment-dashboard login"));
}

#[test]
/// The headless dashboard refuses to start without a session.
fn dashboard_requires_login() {
    let tmp = temp_home();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["dashboard", "--headless", "--backend-url", UNREACHABLE_BACKEND])
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stderr(contains("Not logged in"));
}

#[test]
/// A zero poll interval is rejected before the dashboard starts.
fn zero_poll_interval_is_rejected() {
    let tmp = temp_home();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args([
        "dashboard",
        "--headless",
        "--poll-interval-ms",
        "0",
        "--backend-url",
        UNREACHABLE_BACKEND,
    ])
    .env("HOME", tmp.path())
    .assert()
    .failure()
    .stderr(contains("--poll-interval-ms"))
    .stderr(contains("Not logged in").not());
}

#[test]
/// A reported failure is printed once, without a trailing `Error:` line.
fn command_errors_are_reported_once() {
    let tmp = temp_home();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["email", "stats", "--backend-url", UNREACHABLE_BACKEND])
        .env("HOME", tmp.path())
        .assert()
        .code(1)
        .stderr(contains("Not logged in"))
        .stderr(contains("Error:").not());
}
