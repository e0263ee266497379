// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for zen-update using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! zen-update [--grid-url URL] --auth-token TOKEN [--app-ids ID...]
//!            [-c FILE]... [--dry] [-l LEVEL] [--log-file FILE]
//! ```

pub mod global;
pub mod grid;


use crate::cli::global::GlobalOptions;
use crate::cli::grid::GridArgs;
use clap::Parser;

/// Add/Update 'zen-common' code in all account apps.
#[derive(Debug, Parser)]
#[command(
    name = "zen-update",
    author,
    version,
    about = "Add/Update 'zen-common' code in all account apps.",
    long_about = "Add/Update 'zen-common' code in all account apps.\n\n\
                  Lists every app of every account reachable with the auth token,\n\
                  clones each one with `meya clone`, merges the shared zen-common\n\
                  repository into it as a squashed git subtree and pushes it back\n\
                  with `meya push --build-image`. Failing steps of one app do not\n\
                  stop the run.",
    after_help = "ENVIRONMENT:\n\n\
                  MEYA_GRID_URL and MEYA_AUTH_TOKEN take precedence over\n\
                  --grid-url and --auth-token when set. The upstream repository\n\
                  and tool paths can be changed in ./zen-update.toml, in files\n\
                  given with --config, or with ZEN__<SECTION>__<KEY> variables."
)]
pub struct Cli {
    /// Grid connection and app selection
    #[command(flatten)]
    pub grid: GridArgs,

    /// Options not tied to the grid
    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
