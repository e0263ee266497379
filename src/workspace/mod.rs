// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scoped temporary base directory shared by all app pushes of one run.
//!
//! ```text
//! Workspace::create()        $TMPDIR/zen-update-XXXXXX
//!   app_dir("app-1")    -->  $TMPDIR/zen-update-XXXXXX/app-1   (made by `meya clone`)
//!   close() / drop      -->  removed recursively
//! ```


use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

use crate::error::{WorkspaceError, ZenResult};
use crate::grid::types::AppId;

/// Prefix of the temporary directory name.
pub const WORKSPACE_PREFIX: &str = "zen-update-";

/// Temporary directory removed when dropped or closed.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates the workspace below the system temporary directory.
    ///
    /// # Errors
    ///
    /// Returns `WorkspaceError::Create` if the directory cannot be created.
    pub fn create() -> ZenResult<Self> {
        Self::create_in(std::env::temp_dir())
    }

    /// Creates the workspace below `parent`.
    ///
    /// # Errors
    ///
    /// Returns `WorkspaceError::Create` if the directory cannot be created.
    pub fn create_in(parent: impl AsRef<Path>) -> ZenResult<Self> {
        let parent = parent.as_ref();
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(parent)
            .map_err(|source| WorkspaceError::Create {
                parent: parent.to_path_buf(),
                source,
            })?;

        println!("Created temporary directory: {}", dir.path().display());
        debug!(path = %dir.path().display(), "workspace created");
        Ok(Self { dir })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Directory the clone of `app_id` ends up in.
    #[must_use]
    pub fn app_dir(&self, app_id: &AppId) -> PathBuf {
        self.path().join(app_id.as_str())
    }

    /// Removes the workspace and everything below it.
    ///
    /// # Errors
    ///
    /// Returns `WorkspaceError::Remove` if removal fails. Dropping instead
    /// ignores that failure.
    pub fn close(self) -> ZenResult<()> {
        let path = self.path().to_path_buf();
        if let Err(source) = self.dir.close() {
            return Err(WorkspaceError::Remove { path, source }.into());
        }
        debug!(path = %path.display(), "workspace removed");
        Ok(())
    }
}
