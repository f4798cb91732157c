// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Compose deployment engine port.
//!
//! ```text
//!   Deployer --deploy--> ComposeEngine (trait)
//!                            |
//!                            v
//!                      ShellCompose
//!   docker [-H host] compose -f f1 -f f2 [-p name] [--env-file F] up -d [flags]
//!   docker-compose [-H host] -f f1 ...                        (plugin = false)
//! ```

pub mod shell;


use bon::Builder;
use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

use crate::error::ComposeResult;

pub use shell::ShellCompose;

/// Per-deployment inputs for the engine.
#[derive(Debug, Clone, Builder)]
pub struct ComposeDeployOptions {
    /// Directory the stack is deployed from (the fetched tree).
    #[builder(into)]
    working_dir: PathBuf,
    /// Stack name; `None` or empty lets the engine pick its default.
    #[builder(into)]
    project_name: Option<String>,
    /// Compose files in override order.
    #[builder(default)]
    compose_files: Vec<PathBuf>,
}

impl ComposeDeployOptions {
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// The project name, or `None` when unset or empty.
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref().filter(|name| !name.is_empty())
    }

    #[must_use]
    pub fn compose_files(&self) -> &[PathBuf] {
        &self.compose_files
    }
}

/// Brings a compose stack up.
pub trait ComposeEngine: Send + Sync {
    /// Deploy the stack described by `options`.
    ///
    /// Implementations stop work and return an error when `token` is cancelled.
    fn deploy<'a>(
        &'a self,
        options: &'a ComposeDeployOptions,
        token: CancellationToken,
    ) -> BoxFuture<'a, ComposeResult<()>>;
}
