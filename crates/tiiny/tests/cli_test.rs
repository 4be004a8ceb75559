//! Integration tests for the `tiiny` CLI binary.
//!
//! Argument parsing, help output, completions, and error exits run without
//! network access. The batch tests talk to a local mock API.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `tiiny` binary with env isolation.
///
/// Clears all `TIINY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn tiiny_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("tiiny");
    cmd.env("HOME", "/tmp/tiiny-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/tiiny-cli-test-nonexistent")
        .env_remove("TIINY_PROFILE")
        .env_remove("TIINY_API_URL")
        .env_remove("TIINY_API_KEY")
        .env_remove("TIINY_OUTPUT")
        .env_remove("TIINY_INSECURE")
        .env_remove("TIINY_TIMEOUT")
        .env_remove("TIINY_SITE_PASSWORD");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = tiiny_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_site_commands() {
    tiiny_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Tiiny Host")
            .and(predicate::str::contains("create-html"))
            .and(predicate::str::contains("update"))
            .and(predicate::str::contains("batch")),
    );
}

#[test]
fn test_version_flag() {
    tiiny_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tiiny"));
}

#[test]
fn test_invalid_subcommand() {
    tiiny_cmd()
        .arg("publish-everything")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_batch_rejects_unknown_operation() {
    tiiny_cmd()
        .args(["batch", "-i", "items.json", "--operation", "wipe"])
        .assert()
        .failure()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    tiiny_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tiiny"));
}

#[test]
fn test_completions_zsh() {
    tiiny_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Errors ──────────────────────────────────────────────────────────

#[test]
fn test_missing_api_key_exits_auth() {
    let output = tiiny_cmd().arg("verify").output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("No API key"), "{text}");
}

#[test]
fn test_unknown_profile_is_an_error() {
    let output = tiiny_cmd()
        .args(["--profile", "staging", "--api-key", "k", "verify"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("staging"));
}

#[test]
fn test_delete_requires_yes_when_not_a_tty() {
    tiiny_cmd()
        .args(["--api-key", "k", "--api-url", "http://127.0.0.1:9", "delete", "a.tiiny.site"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_invalid_api_url_is_usage_error() {
    tiiny_cmd()
        .args(["--api-key", "k", "--api-url", "not a url", "verify"])
        .assert()
        .failure()
        .code(2);
}

// ── Against a mock API ──────────────────────────────────────────────

async fn mock_upload(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v3/external/pub/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "link": "a.tiiny.site" })))
        .mount(server)
        .await;
}

fn write_items(dir: &std::path::Path, items: &str) -> std::path::PathBuf {
    let input = dir.join("items.ndjson");
    std::fs::write(&input, items).unwrap();
    input
}

#[tokio::test(flavor = "multi_thread")]
async fn test_batch_continue_records_failures() {
    let server = MockServer::start().await;
    mock_upload(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let input = write_items(
        dir.path(),
        concat!(
            r#"{"operation":"createHtml","htmlContent":"<h1>hi</h1>","subdomain":"a"}"#,
            "\n",
            r#"{"operation":"delete","link":"nodot"}"#,
            "\n",
        ),
    );

    let mut cmd = tiiny_cmd();
    cmd.args(["--api-key", "k", "--api-url", &server.uri(), "-o", "json-compact"])
        .args(["batch", "--continue-on-fail", "-i"])
        .arg(&input);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let results: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results[0]["json"]["link"], "a.tiiny.site");
    assert_eq!(results[0]["pairedItem"], 0);
    assert!(results[1]["json"]["error"].as_str().unwrap().contains("nodot"));
    assert_eq!(results[1]["pairedItem"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_batch_abort_reports_item_index() {
    let server = MockServer::start().await;
    mock_upload(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let input = write_items(
        dir.path(),
        concat!(
            r#"{"operation":"delete","link":"nodot"}"#,
            "\n",
            r#"{"operation":"createHtml","htmlContent":"<p/>"}"#,
            "\n",
        ),
    );

    let mut cmd = tiiny_cmd();
    cmd.args(["--api-key", "k", "--api-url", &server.uri(), "batch", "-i"])
        .arg(&input);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("nodot"));
    assert!(server.received_requests().await.unwrap().is_empty());
}
