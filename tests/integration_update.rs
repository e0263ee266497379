// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the update run against a mocked grid.
//!
//! Covers:
//! - The apps request (path, auth header, GraphQL body)
//! - Accounts-then-apps push order and the `--app-ids` filter
//! - Fatal listing failures (no push attempted)
//! - Workspace cleanup

use std::sync::Mutex;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zen_update::cmd::update::run_update;
use zen_update::config::Config;
use zen_update::config::settings::{AuthToken, UpdateSettings};
use zen_update::error::{NetworkError, ZenError, ZenResult};
use zen_update::push::StepStatus;
use zen_update::push::runner::{CommandRunner, Invocation, Step};

#[derive(Default)]
struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    failing_step: Option<Step>,
    /// Deletes the whole workspace when this step runs.
    removes_workspace_on: Option<Step>,
}

impl RecordingRunner {
    fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// App ids in the order their clone step ran.
    fn cloned_apps(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|i| i.step == Step::Clone)
            .filter_map(|i| i.args.last().cloned())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> ZenResult<i32> {
        self.calls.lock().unwrap().push(invocation.clone());
        if self.removes_workspace_on == Some(invocation.step)
            && let Some(workspace) = invocation.cwd.parent()
            && workspace.exists()
        {
            std::fs::remove_dir_all(workspace).unwrap();
        }
        Ok(if self.failing_step == Some(invocation.step) { 1 } else { 0 })
    }
}

fn http_status(err: &ZenError) -> Option<u16> {
    match err {
        ZenError::Network(network) => match network.as_ref() {
            NetworkError::HttpError { status, .. } => Some(*status),
            _ => None,
        },
        _ => None,
    }
}

fn settings(server: &MockServer, app_filter: Option<&[&str]>) -> UpdateSettings {
    UpdateSettings {
        grid_url: server.uri(),
        auth_token: AuthToken::new("t"),
        app_filter: app_filter.map(|ids| ids.iter().map(ToString::to_string).collect()),
        dry: false,
    }
}

fn two_accounts() -> serde_json::Value {
    json!({
        "data": {
            "user": {
                "accounts": [
                    { "id": "acc-a", "apps": [ { "id": "a1" }, { "id": "a2" } ] },
                    { "id": "acc-b", "apps": [ { "id": "b1" } ] }
                ]
            }
        }
    })
}

async fn mount_apps(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/console/v2/api/"))
        .and(header("Authorization", "Token t"))
        .and(body_partial_json(json!({ "variables": {} })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

// =============================================================================
// Successful runs
// =============================================================================

#[tokio::test]
async fn test_pushes_every_app_in_listing_order() {
    let server = MockServer::start().await;
    mount_apps(&server, ResponseTemplate::new(200).set_body_json(two_accounts())).await;

    let runner = RecordingRunner::default();
    let summary = run_update(&settings(&server, None), &Config::default(), &runner)
        .await
        .expect("update should succeed");

    assert_eq!(runner.cloned_apps(), ["a1", "a2", "b1"]);
    assert_eq!(runner.calls().len(), 12);
    assert_eq!(summary.app_count(), 3);
    assert_eq!(summary.failed_steps(), 0);
}

#[tokio::test]
async fn test_filter_keeps_listing_order() {
    let server = MockServer::start().await;
    mount_apps(&server, ResponseTemplate::new(200).set_body_json(two_accounts())).await;

    let runner = RecordingRunner::default();
    let summary = run_update(
        &settings(&server, Some(&["b1", "a1", "zz"])),
        &Config::default(),
        &runner,
    )
    .await
    .expect("update should succeed");

    assert_eq!(runner.cloned_apps(), ["a1", "b1"]);
    let ids: Vec<&str> = summary.reports.iter().map(|r| r.app_id.as_str()).collect();
    assert_eq!(ids, ["a1", "b1"]);
}

#[tokio::test]
async fn test_clone_uses_grid_url_and_workspace() {
    let server = MockServer::start().await;
    mount_apps(&server, ResponseTemplate::new(200).set_body_json(two_accounts())).await;

    let runner = RecordingRunner::default();
    let summary = run_update(&settings(&server, Some(&["a2"])), &Config::default(), &runner)
        .await
        .expect("update should succeed");

    let calls = runner.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0].cwd, summary.workspace);
    assert_eq!(
        calls[0].args,
        [
            "clone",
            "--grid-url",
            server.uri().as_str(),
            "--app-id",
            "a2",
            "--directory",
            "a2"
        ]
    );
    for call in &calls[1..] {
        assert_eq!(call.cwd, summary.workspace.join("a2"));
    }
}

#[tokio::test]
async fn test_step_failures_do_not_stop_the_run() {
    let server = MockServer::start().await;
    mount_apps(&server, ResponseTemplate::new(200).set_body_json(two_accounts())).await;

    let runner = RecordingRunner {
        failing_step: Some(Step::Clone),
        ..RecordingRunner::default()
    };
    let summary = run_update(&settings(&server, None), &Config::default(), &runner)
        .await
        .expect("per-app failures are not fatal");

    assert_eq!(runner.calls().len(), 12);
    assert_eq!(summary.apps_with_failures(), 3);
    for report in &summary.reports {
        assert_eq!(report.steps[0].status, StepStatus::Failed(1));
        assert_eq!(report.steps[3].status, StepStatus::Succeeded);
    }
}

#[tokio::test]
async fn test_workspace_removed_after_run() {
    let server = MockServer::start().await;
    mount_apps(&server, ResponseTemplate::new(200).set_body_json(two_accounts())).await;

    let runner = RecordingRunner::default();
    let summary = run_update(&settings(&server, None), &Config::default(), &runner)
        .await
        .expect("update should succeed");

    assert!(!summary.workspace.as_os_str().is_empty());
    assert!(!summary.workspace.exists());
}

#[tokio::test]
async fn test_workspace_removal_failure_is_not_fatal() {
    let server = MockServer::start().await;
    mount_apps(&server, ResponseTemplate::new(200).set_body_json(two_accounts())).await;

    let runner = RecordingRunner {
        removes_workspace_on: Some(Step::Push),
        ..RecordingRunner::default()
    };
    let summary = run_update(&settings(&server, None), &Config::default(), &runner)
        .await
        .expect("a failed cleanup does not fail the run");

    assert_eq!(summary.app_count(), 3);
    assert_eq!(runner.calls().len(), 12);
    assert!(!summary.workspace.exists());
}

#[tokio::test]
async fn test_no_apps_means_no_pushes() {
    let server = MockServer::start().await;
    mount_apps(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "data": { "user": { "accounts": [] } } })),
    )
    .await;

    let runner = RecordingRunner::default();
    let summary = run_update(&settings(&server, None), &Config::default(), &runner)
        .await
        .expect("update should succeed");

    assert!(runner.calls().is_empty());
    assert_eq!(summary.app_count(), 0);
}

// =============================================================================
// Fatal listing failures
// =============================================================================

#[tokio::test]
async fn test_http_error_stops_before_any_push() {
    let server = MockServer::start().await;
    mount_apps(
        &server,
        ResponseTemplate::new(500).set_body_string("upstream exploded"),
    )
    .await;

    let runner = RecordingRunner::default();
    let err = run_update(&settings(&server, None), &Config::default(), &runner)
        .await
        .unwrap_err();

    assert!(runner.calls().is_empty());
    assert_eq!(http_status(&err), Some(500));
    match err {
        ZenError::Network(network) => match *network {
            NetworkError::HttpError { body, url, .. } => {
                assert_eq!(body, "upstream exploded");
                assert_eq!(url, format!("{}/console/v2/api/", server.uri()));
            }
            other => panic!("expected HttpError, got {other:?}"),
        },
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_200_success_status_is_fatal() {
    let server = MockServer::start().await;
    mount_apps(&server, ResponseTemplate::new(201).set_body_json(two_accounts())).await;

    let runner = RecordingRunner::default();
    let err = run_update(&settings(&server, None), &Config::default(), &runner)
        .await
        .unwrap_err();

    assert_eq!(http_status(&err), Some(201));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_fatal() {
    let server = MockServer::start().await;
    mount_apps(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "errors": [ { "message": "nope" } ] })),
    )
    .await;

    let runner = RecordingRunner::default();
    let err = run_update(&settings(&server, None), &Config::default(), &runner)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ZenError::Network(ref n) if matches!(**n, NetworkError::MalformedResponse { .. })
    ));
    assert!(runner.calls().is_empty());
}
