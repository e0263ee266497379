// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading on top of the `config` crate.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("zen-update.toml")   skipped when absent
//!   .add_toml_file(--config)                     must exist
//!   .add_toml_str(..)                            tests, inline overrides
//!   .with_env_prefix("ZEN")                      ZEN__UPSTREAM__BRANCH=main
//!        |
//!   build() --> Config (validated)
//! ```
//!
//! Later sources win key by key; environment variables win over all files.

use std::fmt;
use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, ZenResult};

/// A source that takes part in the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File given explicitly; a missing file is an error.
    Required(PathBuf),
    /// File that existed when it was added.
    Optional(PathBuf),
    /// TOML text passed directly.
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(path) | Self::Optional(path) => write!(f, "{}", path.display()),
            Self::Inline => f.write_str("<inline>"),
        }
    }
}

pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Adds a TOML file that must exist when `build()` runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        self.with_file(path, true, ConfigSource::Required(path.to_path_buf()))
    }

    /// Adds a TOML file that is silently skipped when missing.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return self;
        }
        self.with_file(path, false, ConfigSource::Optional(path.to_path_buf()))
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Reads `<PREFIX>__<SECTION>__<KEY>` environment variables last.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Merges every source and validates the result.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - A required file is missing or is not valid TOML.
    /// - A key is unknown or has the wrong type.
    /// - A value fails validation.
    pub fn build(self) -> ZenResult<Config> {
        let origin = self.describe_sources();
        let mut builder = self.builder;
        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("__")
                    .separator("__"),
            );
        }

        let mut config: Config = builder
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| ConfigError::ParseError {
                path: origin,
                message: e.to_string(),
            })?;
        config.resolve_and_validate()?;
        Ok(config)
    }

    /// Sources added so far, in merge order.
    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    fn with_file(mut self, path: &Path, required: bool, source: ConfigSource) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self.sources.push(source);
        self
    }

    fn describe_sources(&self) -> String {
        if self.sources.is_empty() {
            return "<defaults>".to_string();
        }
        self.sources
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
