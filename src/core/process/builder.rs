// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process description: program, arguments, working directory, flags.
//!
//! ```text
//! ProcessBuilder::which("meya")      resolve through PATH (cached)
//!   .args([...]).cwd(dir).name("clone")
//!   .flag(ALLOW_FAILURE)             exit code is data, not an error
//! ```
//!
//! Children share the terminal: their stdout and stderr are inherited so
//! `meya` and `git` progress shows up live.

use bitflags::bitflags;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::error::ProcessError;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProcessFlags: u32 {
        /// Return the output of a non-zero exit instead of an error
        const ALLOW_FAILURE = 0x01;
    }
}

/// Resolved PATH lookups, keyed by the name asked for.
fn resolved_executables() -> &'static RwLock<BTreeMap<String, PathBuf>> {
    static RESOLVED: OnceLock<RwLock<BTreeMap<String, PathBuf>>> = OnceLock::new();
    RESOLVED.get_or_init(|| RwLock::new(BTreeMap::new()))
}

/// Exit code of a finished process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    exit_code: i32,
}

impl ProcessOutput {
    pub(super) const fn new(exit_code: i32) -> Self {
        Self { exit_code }
    }

    /// Exit code of the process; `-1` when it was ended by a signal.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// An external command waiting to be run with [`ProcessBuilder::run`].
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    pub(super) program: PathBuf,
    pub(super) args: Vec<String>,
    pub(super) cwd: Option<PathBuf>,
    pub(super) flags: ProcessFlags,
    pub(super) name: Option<String>,
}

impl ProcessBuilder {
    /// A bare program name is looked up in PATH by the OS when spawning.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            flags: ProcessFlags::empty(),
            name: None,
        }
    }

    /// Creates a builder for `program` resolved to a full path up front.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if `program` is neither an
    /// executable path nor found in PATH.
    pub fn which(program: &str) -> Result<Self, ProcessError> {
        Self::find(program)
            .map(Self::new)
            .ok_or_else(|| ProcessError::ExecutableNotFound {
                name: program.to_string(),
            })
    }

    /// Full path of `program`, via the `which` crate. Hits are cached for
    /// the lifetime of the process.
    #[must_use]
    pub fn find(program: &str) -> Option<PathBuf> {
        if let Some(path) = resolved_executables()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(program)
        {
            return Some(path.clone());
        }

        let path = which::which(program).ok()?;
        resolved_executables()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(program.to_string(), path.clone());
        Some(path)
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_string_lossy().into_owned()));
        self
    }

    /// Runs the child in `dir`. The parent's working directory is untouched.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: ProcessFlags) -> Self {
        self.flags |= flag;
        self
    }

    /// Name used in log events instead of the program's file stem.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
