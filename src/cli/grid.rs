// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Grid connection arguments.
//!
//! ```text
//! $ zen-update --auth-token $TOKEN
//! $ zen-update --grid-url https://grid.example --app-ids app-1 app-2
//! $ MEYA_AUTH_TOKEN=... zen-update
//! ```

use clap::Args;
use clap::builder::NonEmptyStringValueParser;

use crate::config::settings::{AUTH_TOKEN_ENV, DEFAULT_GRID_URL, GRID_URL_ENV};

/// Grid URL, credentials and app selection.
#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    /// The grid URL you want to connect to.
    #[arg(
        long = "grid-url",
        value_name = "URL",
        env = GRID_URL_ENV,
        default_value = DEFAULT_GRID_URL,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub grid_url: String,

    /// Your Meya auth token.
    #[arg(
        long = "auth-token",
        value_name = "TOKEN",
        env = AUTH_TOKEN_ENV,
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub auth_token: String,

    /// The app IDs you would like to update.
    #[arg(long = "app-ids", value_name = "APP_ID", num_args = 1..)]
    pub app_ids: Option<Vec<String>>,
}
