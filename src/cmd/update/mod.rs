// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Update command: push the shared subtree into every selected app.
//!
//! ```text
//! GridClient::list_app_ids(token)     (fatal on failure, nothing pushed)
//!        |
//!        v
//! filter_app_ids(all, --app-ids)
//!        |
//!        v
//! Workspace::create()
//!        |
//!        v
//! for app in apps:  AppPusher::push(workspace, app)   (sequential)
//!        |
//!        v
//! Workspace::close()   (failure only logged) --> UpdateSummary
//! ```

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::config::settings::UpdateSettings;
use crate::error::ZenResult;
use crate::filter::filter_app_ids;
use crate::grid::GridClient;
use crate::push::runner::CommandRunner;
use crate::push::{AppPushReport, AppPusher};
use crate::workspace::Workspace;

/// Outcome of one update run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Temporary base directory used for the run; removed by the time the
    /// summary is returned.
    pub workspace: PathBuf,
    /// One report per pushed app, in push order.
    pub reports: Vec<AppPushReport>,
}

impl UpdateSummary {
    #[must_use]
    pub fn app_count(&self) -> usize {
        self.reports.len()
    }

    /// Apps with at least one failed step.
    #[must_use]
    pub fn apps_with_failures(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_clean()).count()
    }

    #[must_use]
    pub fn failed_steps(&self) -> usize {
        self.reports.iter().map(AppPushReport::failed_steps).sum()
    }
}

/// Runs one update over all apps visible to the configured token.
///
/// Per-app step failures are reported in the summary and never returned as
/// errors.
///
/// # Errors
///
/// Returns an error if:
/// - Listing the apps fails (non-200 status, transport error, malformed body).
///   No workspace is created and no app is touched in that case.
/// - The workspace cannot be created.
pub async fn run_update<R: CommandRunner>(
    settings: &UpdateSettings,
    config: &Config,
    runner: &R,
) -> ZenResult<UpdateSummary> {
    let client = GridClient::new(&settings.grid_url);
    let all = client.list_app_ids(settings.auth_token.expose()).await?;

    let total = all.len();
    let apps = filter_app_ids(all, settings.app_filter.as_deref());
    if settings.app_filter.is_some() {
        info!(selected = apps.len(), total, "applied app filter");
    }

    let workspace = Workspace::create()?;
    let pusher = AppPusher::new(runner, &settings.grid_url, &config.upstream, &config.tools);

    let mut reports = Vec::with_capacity(apps.len());
    for app_id in &apps {
        reports.push(pusher.push(workspace.path(), app_id).await);
    }

    let summary = UpdateSummary {
        workspace: workspace.path().to_path_buf(),
        reports,
    };
    // A leftover directory is logged, never fatal.
    if let Err(e) = workspace.close() {
        warn!(error = %e, "leaving temporary directory behind");
    }

    if summary.apps_with_failures() == 0 {
        info!(apps = summary.app_count(), "update finished");
    } else {
        warn!(
            apps = summary.app_count(),
            apps_with_failures = summary.apps_with_failures(),
            failed_steps = summary.failed_steps(),
            "update finished with failures"
        );
    }

    Ok(summary)
}
