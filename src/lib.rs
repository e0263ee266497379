// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)        cmd::update (handler)
//!                |                     |
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML layers, run settings|
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!               grid        filter  workspace
//!            GraphQL API   allow-list  TempDir
//!                 |
//!                 v
//!               push
//!        clone / remote / subtree / push
//!
//!   +-----------------------------------------+
//!   |  core   process (tokio::process, which) |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod filter;
pub mod grid;
pub mod logging;
pub mod push;
pub mod workspace;
