// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use tokio_util::sync::CancellationToken;

use super::{CloneOptions, DEFAULT_CLONE_DEPTH, ShellGit, VcsClient};
use crate::auth::Credential;
use crate::error::GitError;

#[test]
fn test_clone_options_defaults() {
    let options = CloneOptions::new("https://example.com/org/app.git", None);
    assert_eq!(options.depth(), DEFAULT_CLONE_DEPTH);
    assert_eq!(options.url(), "https://example.com/org/app.git");
    assert!(options.credential().is_none());

    let deeper = options.with_depth(5);
    assert_eq!(deeper.depth(), 5);
}

#[test]
fn test_clone_command_line() {
    let git = ShellGit::default();
    let options = CloneOptions::new("https://example.com/org/app.git", None);
    let builder = git.clone_command(Path::new("/srv/stacks/app"), &options);

    insta::assert_snapshot!(
        builder.command_line(),
        @"git clone --quiet --depth 1 -- https://example.com/org/app.git /srv/stacks/app"
    );
}

#[test]
fn test_anonymous_clone_sets_no_auth_env() {
    let git = ShellGit::default();
    let options = CloneOptions::new("https://example.com/org/app.git", None);
    let builder = git.clone_command(Path::new("/tmp/app"), &options);

    let keys: Vec<&str> = builder.env_keys().collect();
    assert_eq!(keys, ["GCM_INTERACTIVE", "GIT_TERMINAL_PROMPT"]);
}

#[test]
fn test_credential_passed_through_env_only() {
    let git = ShellGit::new("/usr/bin/git");
    let credential = Credential::derive("", "s3cret-token");
    let options = CloneOptions::new("https://example.com/org/app.git", credential);
    let builder = git.clone_command(Path::new("/tmp/app"), &options);

    let keys: Vec<&str> = builder.env_keys().collect();
    assert_eq!(
        keys,
        [
            "GCM_INTERACTIVE",
            "GIT_CONFIG_COUNT",
            "GIT_CONFIG_KEY_0",
            "GIT_CONFIG_VALUE_0",
            "GIT_TERMINAL_PROMPT",
        ]
    );
    assert!(!builder.command_line().contains("s3cret-token"));
    assert!(!format!("{builder:?}").contains("s3cret-token"));
    assert!(!format!("{options:?}").contains("s3cret-token"));
}

#[tokio::test]
async fn test_cancelled_clone_is_interrupted() {
    let temp = tempfile::tempdir().unwrap();
    let git = ShellGit::default();
    let options = CloneOptions::new("https://example.com/org/app.git", None);

    let token = CancellationToken::new();
    token.cancel();

    let err = git
        .clone_repository(&temp.path().join("app"), &options, token)
        .await
        .expect_err("cancelled clone should fail");
    assert!(matches!(err, GitError::Interrupted { .. }));
}

#[tokio::test]
async fn test_missing_program_is_process_error() {
    let temp = tempfile::tempdir().unwrap();
    let git = ShellGit::new("definitely-not-git-12345");
    let options = CloneOptions::new("https://example.com/org/app.git", None);

    let err = git
        .clone_repository(&temp.path().join("app"), &options, CancellationToken::new())
        .await
        .expect_err("spawn should fail");
    assert!(matches!(err, GitError::Process(_)));
}

#[tokio::test]
async fn test_clone_of_missing_repository_fails() {
    let temp = tempfile::tempdir().unwrap();
    let url = format!("file://{}", temp.path().join("nowhere.git").display());
    let options = CloneOptions::new(url, None);

    let err = ShellGit::default()
        .clone_repository(&temp.path().join("app"), &options, CancellationToken::new())
        .await
        .expect_err("clone of a missing repository should fail");
    assert!(matches!(err, GitError::CloneFailed { .. }), "{err:?}");
}
