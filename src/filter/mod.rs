// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! App id allow-list filtering.
//!
//! ```text
//! all:   [a1, a2, b1]      allow: [b1, a1]
//!              \             /
//!               v           v
//!          filter_app_ids(all, allow)
//!                    |
//!                    v
//!               [a1, b1]   (order of `all`)
//! ```

use std::collections::BTreeSet;

use crate::grid::types::AppId;

/// Narrows `all` to the ids named in `allow`.
///
/// `None` keeps every id. Otherwise the result is the subsequence of `all`
/// whose ids appear in `allow`, in the order of `all`; the order of `allow`
/// and any ids in it that `all` lacks are ignored.
#[must_use]
pub fn filter_app_ids(all: Vec<AppId>, allow: Option<&[String]>) -> Vec<AppId> {
    let Some(allow) = allow else {
        return all;
    };

    let allowed: BTreeSet<&str> = allow.iter().map(String::as_str).collect();
    all.into_iter()
        .filter(|id| allowed.contains(id.as_str()))
        .collect()
}
