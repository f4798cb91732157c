// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deploy command arguments.

use clap::Args;
use std::path::PathBuf;

use crate::auth::REDACTED;
use crate::deploy::DeploymentRequest;

/// Arguments for the `deploy` command.
#[derive(Clone, Args)]
pub struct DeployArgs {
    /// Git repository address, e.g. `https://example.com/org/stack.git`.
    #[arg(value_name = "REPOSITORY")]
    pub repository: String,

    /// Directory the repository is cloned into (as `<DESTINATION>/<name>`).
    /// An existing directory is replaced.
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// Compose file(s) relative to the repository root, in override order.
    #[arg(value_name = "COMPOSE_FILE", required = true, num_args = 1..)]
    pub compose_files: Vec<PathBuf>,

    /// Username for Git authentication (defaults to "token" when only a
    /// password is given).
    #[arg(short = 'u', long = "user", value_name = "USER")]
    pub user: Option<String>,

    /// Password or access token for Git authentication.
    #[arg(
        short = 'p',
        long = "password",
        value_name = "PASSWORD",
        env = "STACKDEPLOY_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Compose project name; the engine default is used when omitted.
    #[arg(short = 'n', long = "project-name", value_name = "NAME")]
    pub project_name: Option<String>,
}

impl DeployArgs {
    /// Build the deployment request.
    #[must_use]
    pub fn to_request(&self) -> DeploymentRequest {
        DeploymentRequest::builder()
            .repository(self.repository.as_str())
            .username(self.user.clone().unwrap_or_default())
            .password(self.password.clone().unwrap_or_default())
            .destination(self.destination.as_path())
            .compose_files(self.compose_files.clone())
            .maybe_project_name(self.project_name.as_deref())
            .build()
    }
}

impl std::fmt::Debug for DeployArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployArgs")
            .field("repository", &self.repository)
            .field("destination", &self.destination)
            .field("compose_files", &self.compose_files)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("project_name", &self.project_name)
            .finish()
    }
}
