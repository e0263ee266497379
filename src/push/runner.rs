// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External command invocations and the runners that execute them.
//!
//! ```text
//! Invocation { step, program, args, cwd }
//!        |
//!        v
//! CommandRunner::run()
//!   ShellRunner --> which(program) --> ProcessBuilder (inherit stdio, ALLOW_FAILURE) --> exit code
//!   DryRunner   --> log only                                      --> 0
//! ```

use std::fmt;
use std::path::PathBuf;
use tracing::info;

use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::ZenResult;

/// One external step of an app push, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `meya clone` into `<base>/<app_id>`.
    Clone,
    /// `git remote add -f` for the upstream repository.
    AddRemote,
    /// `git subtree add --squash` of the upstream branch.
    SubtreeAdd,
    /// `meya push --build-image`.
    Push,
}

impl Step {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clone => "clone",
            Self::AddRemote => "remote-add",
            Self::SubtreeAdd => "subtree-add",
            Self::Push => "push",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved external command, including where it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub step: Step,
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new<I, S>(step: Step, program: &str, args: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            step,
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Executes invocations and reports their exit code.
///
/// A non-zero exit code is a normal `Ok` result; `Err` means the command
/// could not be run at all.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Runs `invocation` to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be spawned or awaited.
    async fn run(&self, invocation: &Invocation) -> ZenResult<i32>;
}

/// Runs invocations as real subprocesses, output streamed live to the
/// terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    async fn run(&self, invocation: &Invocation) -> ZenResult<i32> {
        // Exit codes are reported, never turned into errors.
        let output = ProcessBuilder::which(&invocation.program)?
            .args(&invocation.args)
            .cwd(&invocation.cwd)
            .name(invocation.step.as_str())
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run()
            .await?;
        Ok(output.exit_code())
    }
}

/// Logs invocations without running anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunner;

impl CommandRunner for DryRunner {
    async fn run(&self, invocation: &Invocation) -> ZenResult<i32> {
        info!(
            step = %invocation.step,
            cwd = %invocation.cwd.display(),
            cmd = %invocation,
            "dry run, not executing"
        );
        Ok(0)
    }
}
