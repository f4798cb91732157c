// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Destination directory preparation.
//!
//! ```text
//! prepare(dest)
//!   exists? --err--> DirectoryPreparation(io)
//!     |
//!     +-- Absent  --> create_dir_all(dest) --err--> DeploymentFailure
//!     |
//!     +-- Present --> remove stale dest-old --err--> DirectoryPreparation(io)
//!                     rename dest -> dest-old --err--> DirectoryPreparation(io)
//!                     create_dir_all(dest) --err--> DeploymentFailure
//!     |
//!     v
//!  BackupGuard  (drop: remove dest-old, warn on failure)
//! ```
//!
//! No locking is done here. Two runs against the same destination race on the
//! rename; callers serialize deployments per destination.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::FileSystem;
use crate::error::{DeployError, DeployResult};

/// Suffix appended to the destination to form the backup path.
pub const BACKUP_SUFFIX: &str = "-old";

/// Sibling backup path for `destination` (`<destination>-old`).
#[must_use]
pub fn backup_path(destination: &Path) -> PathBuf {
    // Collecting components drops any trailing separator
    let normalized: PathBuf = destination.components().collect();
    let mut raw: OsString = normalized.into_os_string();
    raw.push(BACKUP_SUFFIX);
    PathBuf::from(raw)
}

/// Observed state of a destination before preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationState {
    /// Nothing at the path; it will be created.
    Absent,
    /// Something is there; it will be moved aside.
    Present,
}

/// Prepares destination directories for a fresh checkout.
#[derive(Debug)]
pub struct DirectoryManager<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
}

impl<'a, F: FileSystem + ?Sized> DirectoryManager<'a, F> {
    pub const fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Inspect `destination`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if existence cannot be determined.
    pub fn inspect(&self, destination: &Path) -> std::io::Result<DestinationState> {
        if self.fs.exists(destination)? {
            Ok(DestinationState::Present)
        } else {
            Ok(DestinationState::Absent)
        }
    }

    /// Prepare `destination` for a fresh checkout.
    ///
    /// The returned guard removes the backup (if any) when dropped.
    ///
    /// # Errors
    ///
    /// - [`DeployError::DirectoryPreparation`] with the original I/O error if
    ///   the destination cannot be inspected or moved aside.
    /// - [`DeployError::DeploymentFailure`] if the destination cannot be created.
    pub fn prepare(&self, destination: &Path) -> DeployResult<BackupGuard<'a, F>> {
        info!(directory = %destination.display(), "Checking the file system...");

        match self.inspect(destination)? {
            DestinationState::Absent => {
                info!(directory = %destination.display(), "Creating folder in the file system...");
                self.create(destination)?;
                Ok(BackupGuard::empty(self.fs))
            }
            DestinationState::Present => {
                info!(directory = %destination.display(), "Backing up folder in the file system...");
                let backup = backup_path(destination);
                self.discard_stale_backup(&backup)?;
                self.fs.rename(destination, &backup)?;
                let guard = BackupGuard::new(self.fs, backup);

                info!(directory = %destination.display(), "Creating target destination directory on disk");
                self.create(destination)?;
                Ok(guard)
            }
        }
    }

    fn create(&self, destination: &Path) -> DeployResult<()> {
        self.fs.create_dir_all(destination).map_err(|e| {
            error!(
                directory = %destination.display(),
                error = %e,
                "Failed to create destination directory"
            );
            DeployError::DeploymentFailure
        })
    }

    /// Remove a backup left behind by an earlier run.
    fn discard_stale_backup(&self, backup: &Path) -> DeployResult<()> {
        if self.fs.exists(backup)? {
            warn!(backup = %backup.display(), "Removing stale backup from a previous run");
            self.fs.remove_dir_all(backup)?;
        }
        Ok(())
    }
}

/// Owns the backup path for the duration of a deployment.
///
/// Dropping the guard removes the backup on a best-effort basis; a failure is
/// logged as a warning and otherwise ignored.
#[must_use = "dropping the guard removes the backup immediately"]
pub struct BackupGuard<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    path: Option<PathBuf>,
}

impl<'a, F: FileSystem + ?Sized> BackupGuard<'a, F> {
    const fn new(fs: &'a F, path: PathBuf) -> Self {
        Self {
            fs,
            path: Some(path),
        }
    }

    const fn empty(fs: &'a F) -> Self {
        Self { fs, path: None }
    }

    /// The backup path, if the destination was moved aside.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl<F: FileSystem + ?Sized> Drop for BackupGuard<'_, F> {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        debug!(backup = %path.display(), "Removing backup directory");
        if let Err(e) = self.fs.remove_dir_all(&path) {
            warn!(
                backup = %path.display(),
                error = %e,
                "Unable to remove backup directory"
            );
        }
    }
}

impl<F: FileSystem + ?Sized> std::fmt::Debug for BackupGuard<'_, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackupGuard")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
