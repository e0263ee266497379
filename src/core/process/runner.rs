// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Spawning and waiting.
//!
//! ```text
//! run()
//!   command()        stdin=null, stdout+stderr inherited, cwd, kill_on_drop
//!   spawn            --> SpawnFailed
//!   wait             --> OutputError
//!   exit != 0        --> NonZeroExit   (unless ALLOW_FAILURE)
//!   ProcessOutput
//! ```

use std::fmt::Write as _;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{ProcessError, ZenResult};

impl ProcessBuilder {
    pub(super) fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.program
            .file_stem()
            .map_or_else(|| "process".to_string(), |s| s.to_string_lossy().into_owned())
    }

    /// Shell-like rendering of the command, for logs and error messages.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            if arg.is_empty() || arg.contains(' ') {
                let _ = write!(line, " \"{arg}\"");
            } else {
                let _ = write!(line, " {arg}");
            }
        }
        line
    }

    /// Spawns the process and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if:
    /// - The process cannot be spawned (missing program or working directory).
    /// - Waiting on the child fails.
    /// - The exit code is non-zero and `ALLOW_FAILURE` is not set.
    pub async fn run(self) -> ZenResult<ProcessOutput> {
        let name = self.display_name();
        let line = self.command_line();
        match &self.cwd {
            Some(cwd) => debug!(cwd = %cwd.display(), cmd = %line, "exec"),
            None => debug!(cmd = %line, "exec"),
        }

        let mut child = self
            .command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: line.clone(),
                source,
            })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let status = child
            .wait()
            .await
            .map_err(|e| ProcessError::OutputError {
                command: line.clone(),
                message: e.to_string(),
            })?;
        let output = ProcessOutput::new(status.code().unwrap_or(-1));

        if !output.success() && !self.flags.contains(ProcessFlags::ALLOW_FAILURE) {
            return Err(ProcessError::NonZeroExit {
                command: line,
                code: output.exit_code(),
            }
            .into());
        }

        trace!(process = %name, exit_code = output.exit_code(), "exited");
        Ok(output)
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command
    }
}
