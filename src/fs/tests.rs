// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cell::Cell;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::destination::{DestinationState, DirectoryManager, backup_path};
use super::{FileSystem, LocalFs};
use crate::error::DeployError;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// `LocalFs` with switchable failures.
#[derive(Default)]
struct FaultyFs {
    fail_rename: Option<io::ErrorKind>,
    fail_create: Option<io::ErrorKind>,
    fail_remove: Option<io::ErrorKind>,
    removals: Cell<usize>,
}

impl FileSystem for FaultyFs {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        LocalFs.exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        match self.fail_create {
            Some(kind) => Err(io::Error::new(kind, "create failed")),
            None => LocalFs.create_dir_all(path),
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        match self.fail_rename {
            Some(kind) => Err(io::Error::new(kind, "rename failed")),
            None => LocalFs.rename(from, to),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        self.removals.set(self.removals.get() + 1);
        match self.fail_remove {
            Some(kind) => Err(io::Error::new(kind, "remove failed")),
            None => LocalFs.remove_dir_all(path),
        }
    }
}

#[test]
fn test_backup_path_appends_suffix() {
    assert_eq!(
        backup_path(Path::new("/data/stacks")),
        PathBuf::from("/data/stacks-old")
    );
    assert_eq!(
        backup_path(Path::new("/data/stacks/")),
        PathBuf::from("/data/stacks-old")
    );
}

#[test]
fn test_inspect_reports_state() {
    let temp = temp_dir();
    let manager = DirectoryManager::new(&LocalFs);

    assert_eq!(
        manager.inspect(temp.path()).unwrap(),
        DestinationState::Present
    );
    assert_eq!(
        manager.inspect(&temp.path().join("missing")).unwrap(),
        DestinationState::Absent
    );
}

#[test]
fn test_prepare_absent_creates_with_ancestors() {
    let temp = temp_dir();
    let destination = temp.path().join("a/b/stacks");
    let manager = DirectoryManager::new(&LocalFs);

    let guard = manager.prepare(&destination).expect("prepare should succeed");

    assert!(guard.path().is_none());
    assert!(destination.is_dir());
    drop(guard);
    assert!(!backup_path(&destination).exists());
}

#[cfg(unix)]
#[test]
fn test_prepare_absent_uses_standard_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = temp_dir();
    let destination = temp.path().join("stacks");
    let _guard = DirectoryManager::new(&LocalFs)
        .prepare(&destination)
        .unwrap();

    let mode = std::fs::metadata(&destination).unwrap().permissions().mode() & 0o777;
    // umask can only remove bits
    assert_eq!(mode & !0o755, 0);
}

#[test]
fn test_prepare_present_moves_aside_and_cleans_up() {
    let temp = temp_dir();
    let destination = temp.path().join("stacks");
    std::fs::create_dir_all(destination.join("oldrepo")).unwrap();
    std::fs::write(destination.join("oldrepo/compose.yml"), "old").unwrap();

    let manager = DirectoryManager::new(&LocalFs);
    let guard = manager.prepare(&destination).expect("prepare should succeed");

    let backup = backup_path(&destination);
    assert_eq!(guard.path(), Some(backup.as_path()));
    assert!(backup.join("oldrepo/compose.yml").is_file());
    assert!(destination.is_dir());
    assert!(!destination.join("oldrepo").exists());

    drop(guard);
    assert!(!backup.exists());
}

#[test]
fn test_prepare_replaces_stale_backup() {
    let temp = temp_dir();
    let destination = temp.path().join("stacks");
    let backup = backup_path(&destination);
    std::fs::create_dir_all(destination.join("current")).unwrap();
    std::fs::create_dir_all(backup.join("stale")).unwrap();

    let guard = DirectoryManager::new(&LocalFs)
        .prepare(&destination)
        .expect("stale backup should not block preparation");

    assert!(backup.join("current").is_dir());
    assert!(!backup.join("stale").exists());
    drop(guard);
    assert!(!backup.exists());
}

#[test]
fn test_rename_failure_returns_original_error() {
    let temp = temp_dir();
    let destination = temp.path().join("stacks");
    std::fs::create_dir_all(&destination).unwrap();

    let fs = FaultyFs {
        fail_rename: Some(io::ErrorKind::CrossesDevices),
        ..FaultyFs::default()
    };
    let err = DirectoryManager::new(&fs)
        .prepare(&destination)
        .expect_err("rename failure should propagate");

    assert!(matches!(err, DeployError::DirectoryPreparation(_)));
    assert_eq!(
        err.io_error().map(io::Error::kind),
        Some(io::ErrorKind::CrossesDevices)
    );
    assert_eq!(err.to_string(), "rename failed");
    // Nothing was moved, so nothing to clean up
    assert_eq!(fs.removals.get(), 0);
    assert!(destination.is_dir());
}

#[test]
fn test_create_failure_is_deployment_failure() {
    let temp = temp_dir();
    let fs = FaultyFs {
        fail_create: Some(io::ErrorKind::PermissionDenied),
        ..FaultyFs::default()
    };

    let err = DirectoryManager::new(&fs)
        .prepare(&temp.path().join("stacks"))
        .expect_err("create failure should propagate");

    assert!(err.is_deployment_failure());
}

#[test]
fn test_cleanup_failure_is_not_fatal() {
    let temp = temp_dir();
    let destination = temp.path().join("stacks");
    std::fs::create_dir_all(&destination).unwrap();

    let fs = FaultyFs {
        fail_remove: Some(io::ErrorKind::PermissionDenied),
        ..FaultyFs::default()
    };
    let guard = DirectoryManager::new(&fs)
        .prepare(&destination)
        .expect("prepare should succeed");

    // Drop must not panic even though removal fails
    drop(guard);
    assert_eq!(fs.removals.get(), 1);
    assert!(backup_path(&destination).exists());
}
