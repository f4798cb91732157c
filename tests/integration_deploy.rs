// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end deployment tests.
//!
//! Clones real local repositories with the git CLI and records what would be
//! handed to the compose engine.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;

use futures_util::future::BoxFuture;
use stackdeploy::compose::{ComposeDeployOptions, ComposeEngine};
use stackdeploy::deploy::{DeployEvent, DeployStage, Deployer, DeploymentRequest};
use stackdeploy::error::ComposeResult;
use stackdeploy::fs::LocalFs;
use stackdeploy::git::ShellGit;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Helper to run git commands in a directory
fn run_git(args: &[&str], cwd: &Path) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Create `<root>/<name>` as a repository with compose files committed.
fn source_repo(root: &Path, name: &str) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    assert!(run_git(&["init", "-q"], &dir));
    fs::write(
        dir.join("docker-compose.yml"),
        "services:\n  web:\n    image: nginx\n",
    )
    .unwrap();
    fs::write(
        dir.join("docker-compose.override.yml"),
        "services:\n  web:\n    ports: [\"8080:80\"]\n",
    )
    .unwrap();
    assert!(run_git(&["add", "."], &dir));
    assert!(run_git(&["commit", "-q", "-m", "Initial stack"], &dir));
    dir
}

fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

#[derive(Default)]
struct RecordingCompose {
    calls: Mutex<Vec<ComposeDeployOptions>>,
}

impl ComposeEngine for RecordingCompose {
    fn deploy<'a>(
        &'a self,
        options: &'a ComposeDeployOptions,
        _token: CancellationToken,
    ) -> BoxFuture<'a, ComposeResult<()>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(options.clone());
            Ok(())
        })
    }
}

// =============================================================================
// Successful deployments
// =============================================================================

#[cfg(not(windows))]
#[tokio::test]
async fn deploy_clones_and_hands_files_to_engine() {
    let sources = temp_dir();
    let repo = source_repo(sources.path(), "myrepo");
    let target = temp_dir();
    let destination = target.path().join("stacks");

    let compose = RecordingCompose::default();
    let (tx, rx) = flume::unbounded();
    let deployer = Deployer::new(ShellGit::default(), compose, LocalFs).with_events(tx);

    let request = DeploymentRequest::builder()
        .repository(file_url(&repo))
        .destination(&destination)
        .compose_files(vec![
            PathBuf::from("docker-compose.yml"),
            PathBuf::from("docker-compose.override.yml"),
        ])
        .project_name("web")
        .build();

    deployer
        .deploy(&request, &CancellationToken::new())
        .await
        .expect("deploy should succeed");

    let clone_target = destination.join("myrepo");
    assert!(clone_target.join(".git").is_dir());
    assert!(clone_target.join("docker-compose.override.yml").is_file());
    assert!(!target.path().join("stacks-old").exists());

    let events: Vec<DeployEvent> = rx.drain().collect();
    assert_eq!(events.last(), Some(&DeployEvent::Completed));
}

#[cfg(not(windows))]
#[tokio::test]
async fn deploy_over_previous_checkout() {
    let sources = temp_dir();
    let repo = source_repo(sources.path(), "myrepo");
    let target = temp_dir();
    let destination = target.path().join("stacks");
    fs::create_dir_all(destination.join("myrepo")).unwrap();
    fs::write(destination.join("myrepo/leftover.yml"), "old").unwrap();

    let deployer = Deployer::new(ShellGit::default(), RecordingCompose::default(), LocalFs);
    let request = DeploymentRequest::builder()
        .repository(file_url(&repo))
        .destination(&destination)
        .compose_files(vec![PathBuf::from("docker-compose.yml")])
        .build();

    deployer
        .deploy(&request, &CancellationToken::new())
        .await
        .expect("deploy should succeed");

    assert!(destination.join("myrepo/docker-compose.yml").is_file());
    assert!(!destination.join("myrepo/leftover.yml").exists());
    assert!(!target.path().join("stacks-old").exists());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn deploy_missing_repository_is_deployment_failure() {
    let sources = temp_dir();
    let target = temp_dir();
    let destination = target.path().join("stacks");
    fs::create_dir_all(&destination).unwrap();
    fs::write(destination.join("keep.txt"), "previous").unwrap();

    let (tx, rx) = flume::unbounded();
    let deployer = Deployer::new(ShellGit::default(), RecordingCompose::default(), LocalFs)
        .with_events(tx);
    let request = DeploymentRequest::builder()
        .repository(file_url(&sources.path().join("missing")))
        .destination(&destination)
        .compose_files(vec![PathBuf::from("docker-compose.yml")])
        .build();

    let err = deployer
        .deploy(&request, &CancellationToken::new())
        .await
        .expect_err("clone of a missing repository should fail");

    insta::assert_snapshot!(err.to_string(), @"compose stack deployment failure");
    assert!(!target.path().join("stacks-old").exists());
    assert!(matches!(
        rx.drain().last(),
        Some(DeployEvent::StageFailed {
            stage: DeployStage::Fetch,
            ..
        })
    ));
}

#[tokio::test]
async fn deploy_invalid_address_leaves_destination_alone() {
    let target = temp_dir();
    let destination = target.path().join("stacks");

    let deployer = Deployer::new(ShellGit::default(), RecordingCompose::default(), LocalFs);
    let request = DeploymentRequest::builder()
        .repository("not-a-url")
        .destination(&destination)
        .build();

    let err = deployer
        .deploy(&request, &CancellationToken::new())
        .await
        .expect_err("invalid address should fail");

    insta::assert_snapshot!(err.to_string(), @"invalid repository address 'not-a-url'");
    assert!(!destination.exists());
}
