// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error types.
//!
//! ```text
//!                 ZenError (boxed, <= 24 bytes)
//!                        |
//!     +-----------+------+-------+-------------+
//!     v           v              v             v
//!  Network      Config        Process       Workspace
//!  HttpError    ParseError    NotFound      Create
//!  Malformed    InvalidValue  SpawnFailed   Remove
//!  Reqwest                    NonZeroExit
//!                             OutputError
//! ```
//!
//! Only `Network` errors end a run early in practice; process errors from
//! the per-app steps are caught and recorded by the pusher.

use std::path::PathBuf;
use thiserror::Error;

/// `anyhow` result for glue code that only adds context.
pub type Result<T> = anyhow::Result<T>;

pub type ZenResult<T> = std::result::Result<T, ZenError>;

/// Top-level error. Each category is boxed so the enum stays small.
#[derive(Debug, Error)]
pub enum ZenError {
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    #[error("workspace error: {0}")]
    Workspace(#[from] Box<WorkspaceError>),
}

/// Implements `From<E> for ZenError` by boxing `E` into the given variant.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ZenError {
                fn from(err: $error) -> Self {
                    ZenError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    NetworkError => Network,
    ConfigError => Config,
    ProcessError => Process,
    WorkspaceError => Workspace,
}

/// Grid API failures.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Any status other than 200. `body` holds the raw response text.
    #[error("http error {status}: {url}")]
    HttpError {
        status: u16,
        url: String,
        body: String,
    },

    /// A 200 answer whose body is not the expected document.
    #[error("malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or does not fit `Config`.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

/// External command failures.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    #[error("failed to wait for process '{command}': {message}")]
    OutputError { command: String, message: String },
}

/// Temporary base directory failures.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("failed to create temporary directory in '{}': {source}", parent.display())]
    Create {
        parent: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove temporary directory '{}': {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
