// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem port and destination directory lifecycle.
//!
//! ```text
//! FileSystem (trait)          LocalFs (std::fs)
//!   exists                      try_exists
//!   create_dir_all              DirBuilder, mode 0755
//!   rename                      fs::rename
//!   remove_dir_all              fs::remove_dir_all
//!
//! destination: DirectoryManager --> BackupGuard (removes <dest>-old on drop)
//! ```

pub mod destination;

#[cfg(test)]
mod tests;

use std::io;
use std::path::Path;

/// Directory operations needed to prepare a deployment destination.
pub trait FileSystem {
    /// Check whether `path` exists. Errors other than "not found" are returned.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if existence cannot be determined.
    fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Create `path` and all missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Move `from` to `to` atomically (rename, never copy).
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, e.g. for cross-device moves.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove a directory tree.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Local disk implementation of [`FileSystem`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

/// Permissions for directories created by [`LocalFs`].
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut builder = std::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(DIR_MODE);
        }
        builder.create(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }
}
