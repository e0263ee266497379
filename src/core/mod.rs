// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for external process management.
//!
//! ```text
//!       core
//!        |
//!        v
//!     process
//!        |
//!   Builder / Output
//!   tokio::process
//! ```

pub mod process;
