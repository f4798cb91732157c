// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git CLI implementation of [`VcsClient`].

use futures_util::future::BoxFuture;
use secrecy::ExposeSecret;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{CloneOptions, VcsClient};
use crate::config::types::GitConfig;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{GitError, GitResult, ProcessError};

/// Runs the `git` executable.
///
/// Always sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0` so a missing
/// or wrong credential fails instead of waiting on a prompt.
#[derive(Debug, Clone)]
pub struct ShellGit {
    program: PathBuf,
}

impl Default for ShellGit {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ShellGit {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &GitConfig) -> Self {
        Self::new(&config.program)
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Build the clone command without running it.
    #[must_use]
    pub fn clone_command(&self, dest: &Path, options: &CloneOptions) -> ProcessBuilder {
        let mut builder = ProcessBuilder::new(&self.program)
            .name("git")
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .arg("clone")
            .arg("--quiet")
            .arg("--depth")
            .arg(options.depth().to_string())
            .arg("--")
            .arg(options.url())
            .arg(dest)
            .capture_stderr();

        if let Some(credential) = options.credential() {
            builder = builder
                .env("GIT_CONFIG_COUNT", "1")
                .env("GIT_CONFIG_KEY_0", "http.extraHeader")
                .env(
                    "GIT_CONFIG_VALUE_0",
                    credential.basic_auth_header().expose_secret(),
                );
        }

        builder
    }

    async fn run_clone(
        &self,
        dest: &Path,
        options: &CloneOptions,
        token: CancellationToken,
    ) -> GitResult<()> {
        let url = options.url();
        debug!(
            url,
            dest = %dest.display(),
            depth = options.depth(),
            authenticated = options.credential().is_some(),
            "Cloning repository"
        );

        let output = self
            .clone_command(dest, options)
            .run_with_cancellation(token)
            .await
            .map_err(|e| match e {
                ProcessError::NonZeroExit { .. } => GitError::CloneFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                },
                other => GitError::from(other),
            })?;

        if output.is_interrupted() {
            return Err(GitError::Interrupted {
                url: url.to_string(),
            });
        }

        info!(url, dest = %dest.display(), "Repository cloned");
        Ok(())
    }
}

impl VcsClient for ShellGit {
    fn clone_repository<'a>(
        &'a self,
        dest: &'a Path,
        options: &'a CloneOptions,
        token: CancellationToken,
    ) -> BoxFuture<'a, GitResult<()>> {
        Box::pin(self.run_clone(dest, options, token))
    }
}
