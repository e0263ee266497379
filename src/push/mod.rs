// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! App pusher: clone, merge the shared subtree, push.
//!
//! ```text
//! AppPusher::push(base, app)
//!   banner
//!   1. meya clone --grid-url U --app-id A --directory A      (cwd: base)
//!   2. git --git-dir G --work-tree W remote add -f R URL     (cwd: base/A)
//!   3. git --git-dir G --work-tree W subtree add
//!          --prefix P R BRANCH --squash                      (cwd: base/A)
//!   4. meya push --build-image                               (cwd: base/A)
//!        |
//!        v
//!   AppPushReport { step outcomes }
//! ```
//!
//! Every step runs even if an earlier one failed. Failures are reported in
//! the returned [`AppPushReport`] and logged; they never stop the run.

pub mod runner;


use std::path::Path;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::config::types::{ToolsConfig, UpstreamConfig};
use crate::grid::types::AppId;
use runner::{CommandRunner, Invocation, Step};

/// Result of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Exit code 0.
    Succeeded,
    /// The command ran and exited with this code.
    Failed(i32),
    /// The command could not be started.
    NotStarted(String),
}

impl StepStatus {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Outcome of one step of an app push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: Step,
    pub status: StepStatus,
}

/// Outcome of pushing one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPushReport {
    pub app_id: AppId,
    pub steps: Vec<StepReport>,
}

impl AppPushReport {
    /// Number of steps that did not succeed.
    #[must_use]
    pub fn failed_steps(&self) -> usize {
        self.steps.iter().filter(|s| !s.status.is_success()).count()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed_steps() == 0
    }
}

/// Banner printed before each app is processed.
#[must_use]
pub fn banner(app_id: &AppId) -> String {
    format!("==================== Pushing App: {app_id} ===========================")
}

/// Runs the push sequence for single apps.
pub struct AppPusher<'a, R> {
    runner: &'a R,
    grid_url: &'a str,
    upstream: &'a UpstreamConfig,
    tools: &'a ToolsConfig,
}

impl<'a, R: CommandRunner> AppPusher<'a, R> {
    #[must_use]
    pub const fn new(
        runner: &'a R,
        grid_url: &'a str,
        upstream: &'a UpstreamConfig,
        tools: &'a ToolsConfig,
    ) -> Self {
        Self {
            runner,
            grid_url,
            upstream,
            tools,
        }
    }

    /// Builds the ordered invocations for `app_id` below `base`.
    #[must_use]
    pub fn plan(&self, base: &Path, app_id: &AppId) -> Vec<Invocation> {
        let app_dir = base.join(app_id.as_str());
        let upstream = self.upstream;
        let git_context = [
            "--git-dir",
            upstream.git_dir.as_str(),
            "--work-tree",
            upstream.work_tree.as_str(),
        ];

        vec![
            Invocation::new(
                Step::Clone,
                &self.tools.meya,
                [
                    "clone",
                    "--grid-url",
                    self.grid_url,
                    "--app-id",
                    app_id.as_str(),
                    "--directory",
                    app_id.as_str(),
                ],
                base,
            ),
            Invocation::new(
                Step::AddRemote,
                &self.tools.git,
                git_context.into_iter().chain([
                    "remote",
                    "add",
                    "-f",
                    upstream.remote_name.as_str(),
                    upstream.url.as_str(),
                ]),
                &app_dir,
            ),
            Invocation::new(
                Step::SubtreeAdd,
                &self.tools.git,
                git_context.into_iter().chain([
                    "subtree",
                    "add",
                    "--prefix",
                    upstream.prefix.as_str(),
                    upstream.remote_name.as_str(),
                    upstream.branch.as_str(),
                    "--squash",
                ]),
                &app_dir,
            ),
            Invocation::new(Step::Push, &self.tools.meya, ["push", "--build-image"], &app_dir),
        ]
    }

    /// Pushes one app. Never fails; see [`AppPushReport`] for step outcomes.
    pub async fn push(&self, base: &Path, app_id: &AppId) -> AppPushReport {
        println!("{}", banner(app_id));

        let span = info_span!("app", id = %app_id);
        async {
            let mut steps = Vec::with_capacity(4);
            for invocation in self.plan(base, app_id) {
                let status = self.run_step(&invocation).await;
                steps.push(StepReport {
                    step: invocation.step,
                    status,
                });
            }

            let report = AppPushReport {
                app_id: app_id.clone(),
                steps,
            };
            if report.is_clean() {
                info!("pushed");
            } else {
                warn!(failed_steps = report.failed_steps(), "finished with failures");
            }
            report
        }
        .instrument(span)
        .await
    }

    async fn run_step(&self, invocation: &Invocation) -> StepStatus {
        debug!(step = %invocation.step, cwd = %invocation.cwd.display(), "running");

        // Per-app failures are tolerated: record them and move on.
        match self.runner.run(invocation).await {
            Ok(0) => StepStatus::Succeeded,
            Ok(code) => {
                warn!(step = %invocation.step, code, cmd = %invocation, "step failed");
                StepStatus::Failed(code)
            }
            Err(e) => {
                warn!(step = %invocation.step, error = %e, cmd = %invocation, "step could not run");
                StepStatus::NotStarted(e.to_string())
            }
        }
    }
}
