// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Compose CLI implementation of [`ComposeEngine`].

use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{ComposeDeployOptions, ComposeEngine};
use crate::config::types::ComposeConfig;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{ComposeError, ComposeResult, ProcessError};

/// Runs `docker compose` (plugin) or a standalone `docker-compose` binary.
///
/// The binary is resolved on each deployment, not at construction.
#[derive(Debug, Clone)]
pub struct ShellCompose {
    program: String,
    plugin: bool,
    host: Option<String>,
    env_file: Option<PathBuf>,
    force_recreate: bool,
    remove_orphans: bool,
}

impl ShellCompose {
    #[must_use]
    pub fn from_config(config: &ComposeConfig) -> Self {
        Self {
            program: config.program.clone(),
            plugin: config.plugin,
            host: config.host.clone().filter(|h| !h.is_empty()),
            env_file: config.env_file.clone(),
            force_recreate: config.force_recreate,
            remove_orphans: config.remove_orphans,
        }
    }

    /// Arguments for `up`, excluding the binary itself.
    #[must_use]
    pub fn up_args(&self, options: &ComposeDeployOptions) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(host) = &self.host {
            args.push("-H".to_string());
            args.push(host.clone());
        }
        if self.plugin {
            args.push("compose".to_string());
        }
        for file in options.compose_files() {
            args.push("-f".to_string());
            args.push(file.to_string_lossy().into_owned());
        }
        if let Some(project) = options.project_name() {
            args.push("-p".to_string());
            args.push(project.to_string());
        }
        if let Some(env_file) = &self.env_file {
            args.push("--env-file".to_string());
            args.push(env_file.to_string_lossy().into_owned());
        }

        args.push("up".to_string());
        args.push("-d".to_string());
        if self.remove_orphans {
            args.push("--remove-orphans".to_string());
        }
        if self.force_recreate {
            args.push("--force-recreate".to_string());
        }
        args
    }

    /// Build the `up` command for an already resolved `binary`.
    #[must_use]
    pub fn up_command(&self, binary: &Path, options: &ComposeDeployOptions) -> ProcessBuilder {
        ProcessBuilder::new(binary)
            .name("compose")
            .args(self.up_args(options))
            .cwd(options.working_dir())
            .capture_stderr()
    }

    fn resolve_binary(&self) -> ComposeResult<PathBuf> {
        ProcessBuilder::find(&self.program)
            .ok_or_else(|| ComposeError::BinaryNotFound(self.program.clone()))
    }

    async fn run_up(
        &self,
        options: &ComposeDeployOptions,
        token: CancellationToken,
    ) -> ComposeResult<()> {
        let working_dir = options.working_dir().display().to_string();
        let binary = self.resolve_binary()?;
        debug!(
            binary = %binary.display(),
            working_dir = %working_dir,
            files = options.compose_files().len(),
            project = options.project_name().unwrap_or_default(),
            "Deploying compose stack"
        );

        let output = self
            .up_command(&binary, options)
            .run_with_cancellation(token)
            .await
            .map_err(|e| match e {
                ProcessError::NonZeroExit { .. } => ComposeError::DeployFailed {
                    working_dir: working_dir.clone(),
                    message: e.to_string(),
                },
                other => ComposeError::from(other),
            })?;

        if output.is_interrupted() {
            return Err(ComposeError::Interrupted(working_dir));
        }

        info!(working_dir = %working_dir, "Compose stack is up");
        Ok(())
    }
}

impl Default for ShellCompose {
    fn default() -> Self {
        Self::from_config(&ComposeConfig::default())
    }
}

impl ComposeEngine for ShellCompose {
    fn deploy<'a>(
        &'a self,
        options: &'a ComposeDeployOptions,
        token: CancellationToken,
    ) -> BoxFuture<'a, ComposeResult<()>> {
        Box::pin(self.run_up(options, token))
    }
}
