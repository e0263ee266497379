// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .name() .flag()
//!   .run()
//!       --> tokio::process::Command   stdin null, stdout+stderr inherited
//!       --> ProcessOutput { exit_code }
//! ```

pub mod builder;
mod runner;
