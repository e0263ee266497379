// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for zen-update.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults (upstream zen-common, meya/git on PATH)
//! 2. ./zen-update.toml (optional)
//! 3. --config FILE (repeatable, required to exist)
//! 4. ZEN__* env vars
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ZEN__UPSTREAM__BRANCH=main   → upstream.branch = "main"
//! ZEN__TOOLS__MEYA=/opt/meya   → tools.meya = "/opt/meya"
//! ```
//!
//! Grid URL and auth token are run settings, not file settings; see
//! [`settings::UpdateSettings`].

pub mod loader;
pub mod settings;
pub mod types;


use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ZenResult};

use loader::ConfigLoader;
use types::{ToolsConfig, UpstreamConfig};

/// Name of the optional configuration file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "zen-update.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "ZEN";

/// Complete file-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Shared repository merged into every app.
    pub upstream: UpstreamConfig,
    /// External executables.
    pub tools: ToolsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use zen_update::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("zen-update.toml")
    ///     .with_env_prefix("ZEN")
    ///     .build()?;
    /// # Ok::<(), zen_update::error::ZenError>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> ZenResult<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate all sections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first empty or malformed value.
    pub fn resolve_and_validate(&mut self) -> Result<(), ConfigError> {
        self.upstream.validate()?;
        self.tools.validate()
    }

    /// Format configuration options as `key = value` lines, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let options = [
            ("tools.git", &self.tools.git),
            ("tools.meya", &self.tools.meya),
            ("upstream.branch", &self.upstream.branch),
            ("upstream.git_dir", &self.upstream.git_dir),
            ("upstream.prefix", &self.upstream.prefix),
            ("upstream.remote_name", &self.upstream.remote_name),
            ("upstream.url", &self.upstream.url),
            ("upstream.work_tree", &self.upstream.work_tree),
        ];
        let width = options.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<width$} = {value}"))
            .collect()
    }
}
