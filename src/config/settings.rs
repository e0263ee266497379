// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-run settings resolved from CLI flags and the environment.
//!
//! ```text
//! MEYA_GRID_URL   (set, non-empty) > --grid-url   > https://grid.meya.ai
//! MEYA_AUTH_TOKEN (set, non-empty) > --auth-token
//! --app-ids a b c                  → Some([a, b, c]), else None
//! ```

use std::fmt;

use crate::cli::grid::GridArgs;

pub const GRID_URL_ENV: &str = "MEYA_GRID_URL";
pub const AUTH_TOKEN_ENV: &str = "MEYA_AUTH_TOKEN";
pub const DEFAULT_GRID_URL: &str = "https://grid.meya.ai";

/// Grid API token. `Debug` never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken([hidden])")
    }
}

/// Everything a single update run needs besides the file configuration.
#[derive(Debug, Clone)]
pub struct UpdateSettings {
    pub grid_url: String,
    pub auth_token: AuthToken,
    /// Allow-list of app ids; `None` processes every app.
    pub app_filter: Option<Vec<String>>,
    /// Log the external commands instead of running them.
    pub dry: bool,
}

impl UpdateSettings {
    /// Resolves settings from parsed flags, letting the environment win.
    ///
    /// `lookup` reads an environment variable; empty values count as unset.
    pub fn resolve<F>(args: &GridArgs, dry: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            grid_url: from_env(GRID_URL_ENV).unwrap_or_else(|| args.grid_url.clone()),
            auth_token: AuthToken::new(
                from_env(AUTH_TOKEN_ENV).unwrap_or_else(|| args.auth_token.clone()),
            ),
            app_filter: args.app_ids.clone().filter(|ids| !ids.is_empty()),
            dry,
        }
    }

    /// Resolves settings against the real process environment.
    #[must_use]
    pub fn from_env(args: &GridArgs, dry: bool) -> Self {
        Self::resolve(args, dry, |key| std::env::var(key).ok())
    }
}
