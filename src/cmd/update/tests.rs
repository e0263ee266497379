// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use super::UpdateSummary;
use crate::grid::types::AppId;
use crate::push::runner::Step;
use crate::push::{AppPushReport, StepReport, StepStatus};

fn report(id: &str, statuses: [StepStatus; 4]) -> AppPushReport {
    let steps = [Step::Clone, Step::AddRemote, Step::SubtreeAdd, Step::Push]
        .into_iter()
        .zip(statuses)
        .map(|(step, status)| StepReport { step, status })
        .collect();
    AppPushReport {
        app_id: AppId::from(id),
        steps,
    }
}

#[test]
fn test_summary_counts() {
    let ok = || StepStatus::Succeeded;
    let summary = UpdateSummary {
        workspace: PathBuf::from("/tmp/zen-update-x"),
        reports: vec![
            report("a1", [ok(), ok(), ok(), ok()]),
            report(
                "a2",
                [
                    StepStatus::Failed(128),
                    StepStatus::NotStarted("no such directory".to_string()),
                    ok(),
                    ok(),
                ],
            ),
            report("b1", [ok(), ok(), StepStatus::Failed(1), ok()]),
        ],
    };

    assert_eq!(summary.app_count(), 3);
    assert_eq!(summary.apps_with_failures(), 2);
    assert_eq!(summary.failed_steps(), 3);
}

#[test]
fn test_empty_summary() {
    let summary = UpdateSummary {
        workspace: PathBuf::new(),
        reports: Vec::new(),
    };
    assert_eq!(summary.app_count(), 0);
    assert_eq!(summary.apps_with_failures(), 0);
    assert_eq!(summary.failed_steps(), 0);
}
