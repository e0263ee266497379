// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for zen-update.
//!
//! ```text
//! Config
//!   upstream  remote_name, url, branch, prefix, git_dir, work_tree
//!   tools     meya, git
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Repository whose code is merged as a subtree into every app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Name of the git remote added to each app repository.
    pub remote_name: String,
    /// Clone URL of the shared repository.
    pub url: String,
    /// Branch merged into the subtree.
    pub branch: String,
    /// Directory (relative to the app root) holding the subtree.
    pub prefix: String,
    /// Git directory of a cloned app, relative to the app root.
    pub git_dir: String,
    /// Work tree passed alongside `git_dir`, relative to the app root.
    pub work_tree: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            remote_name: "zen-common".to_string(),
            url: "https://github.com/roeland-frans/zen-common.git".to_string(),
            branch: "master".to_string(),
            prefix: "zen".to_string(),
            git_dir: ".meya/git".to_string(),
            work_tree: ".".to_string(),
        }
    }
}

impl UpstreamConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("remote_name", &self.remote_name),
            ("url", &self.url),
            ("branch", &self.branch),
            ("prefix", &self.prefix),
            ("git_dir", &self.git_dir),
            ("work_tree", &self.work_tree),
        ] {
            require_non_empty("upstream", key, value)?;
        }
        if self.remote_name.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                section: "upstream".to_string(),
                key: "remote_name".to_string(),
                message: format!("remote name must not contain whitespace, got '{}'", self.remote_name),
            });
        }
        Ok(())
    }
}

/// External executables. Bare names are looked up in PATH.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Meya deployment CLI (`clone`, `push`).
    pub meya: String,
    /// Git CLI (`remote add`, `subtree add`).
    pub git: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            meya: "meya".to_string(),
            git: "git".to_string(),
        }
    }
}

impl ToolsConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("tools", "meya", &self.meya)?;
        require_non_empty("tools", "git", &self.git)
    }
}

fn require_non_empty(section: &str, key: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}
