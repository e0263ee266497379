// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the `zen-update` binary.
//!
//! Runs the real executable against a mocked grid. Only `--dry` runs are
//! used so that no `meya` or `git` process is ever spawned.

use std::process::Output;

use serde_json::json;
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Runs the binary in `cwd` with a clean `MEYA_*`/`ZEN__*` environment.
async fn zen_update(cwd: &TempDir, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_zen-update"));
    cmd.args(args)
        .current_dir(cwd.path())
        .env_remove("MEYA_GRID_URL")
        .env_remove("MEYA_AUTH_TOKEN")
        .env_remove("ZEN__UPSTREAM__BRANCH");
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().await.expect("failed to run zen-update")
}

async fn mount_apps(server: &MockServer, token: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/console/v2/api/"))
        .and(header("Authorization", format!("Token {token}").as_str()))
        .respond_with(response)
        .mount(server)
        .await;
}

fn apps_body() -> serde_json::Value {
    json!({
        "data": {
            "user": {
                "accounts": [
                    { "apps": [ { "id": "a1" }, { "id": "a2" } ] },
                    { "apps": [ { "id": "b1" } ] }
                ]
            }
        }
    })
}

fn banners(stdout: &str) -> Vec<&str> {
    stdout
        .lines()
        .filter_map(|line| line.strip_prefix("==================== Pushing App: "))
        .filter_map(|rest| rest.split_whitespace().next())
        .collect()
}

#[tokio::test]
async fn test_dry_run_lists_and_announces_every_app() {
    let server = MockServer::start().await;
    mount_apps(&server, "flag-token", ResponseTemplate::new(200).set_body_json(apps_body())).await;
    let uri = server.uri();

    let cwd = temp_dir();
    let output = zen_update(
        &cwd,
        &["--grid-url", uri.as_str(), "--auth-token", "flag-token", "--dry", "-l", "0"],
        &[],
    )
    .await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}");
    assert!(stdout.contains("Created temporary directory: "));
    assert_eq!(banners(&stdout), ["a1", "a2", "b1"]);
}

#[tokio::test]
async fn test_env_overrides_flags() {
    let server = MockServer::start().await;
    mount_apps(&server, "env-token", ResponseTemplate::new(200).set_body_json(apps_body())).await;
    let uri = server.uri();

    let cwd = temp_dir();
    let output = zen_update(
        &cwd,
        &[
            "--grid-url",
            "http://127.0.0.1:9",
            "--auth-token",
            "flag-token",
            "--app-ids",
            "b1",
            "--dry",
            "-l",
            "0",
        ],
        &[("MEYA_GRID_URL", uri.as_str()), ("MEYA_AUTH_TOKEN", "env-token")],
    )
    .await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}");
    assert_eq!(banners(&stdout), ["b1"]);
}

#[tokio::test]
async fn test_token_from_env_without_flag() {
    let server = MockServer::start().await;
    mount_apps(&server, "env-token", ResponseTemplate::new(200).set_body_json(apps_body())).await;
    let uri = server.uri();

    let cwd = temp_dir();
    let output = zen_update(
        &cwd,
        &["--grid-url", uri.as_str(), "--dry", "-l", "0"],
        &[("MEYA_AUTH_TOKEN", "env-token")],
    )
    .await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(0), "stdout: {stdout}");
    assert_eq!(banners(&stdout), ["a1", "a2", "b1"]);
}

#[tokio::test]
async fn test_http_error_exits_with_one() {
    let server = MockServer::start().await;
    mount_apps(
        &server,
        "flag-token",
        ResponseTemplate::new(401).set_body_string("{\"detail\": \"Invalid token.\"}"),
    )
    .await;
    let uri = server.uri();

    let cwd = temp_dir();
    let output = zen_update(
        &cwd,
        &["--grid-url", uri.as_str(), "--auth-token", "flag-token", "-l", "0"],
        &[],
    )
    .await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        ["Could not get list of apps:", "401:", "{\"detail\": \"Invalid token.\"}"]
    );
}

#[tokio::test]
async fn test_missing_token_is_usage_error() {
    let cwd = temp_dir();
    let output = zen_update(&cwd, &["--grid-url", "http://127.0.0.1:9"], &[]).await;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--auth-token"), "stderr: {stderr}");
}

#[tokio::test]
async fn test_empty_env_token_is_usage_error() {
    let server = MockServer::start().await;
    let uri = server.uri();

    let cwd = temp_dir();
    let output = zen_update(
        &cwd,
        &["--grid-url", uri.as_str(), "--dry"],
        &[("MEYA_AUTH_TOKEN", "")],
    )
    .await;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--auth-token"), "stderr: {stderr}");
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_invalid_config_file_fails() {
    let cwd = temp_dir();
    std::fs::write(cwd.path().join("zen-update.toml"), "[upstream]\nprefix = \"\"\n")
        .expect("write config");

    let output = zen_update(&cwd, &["--auth-token", "t", "--dry", "-l", "0"], &[]).await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"), "stderr: {stderr}");
}
