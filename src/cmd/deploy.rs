// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deploy command.
//!
//! ```text
//! DeployArgs --> DeploymentRequest
//! Config     --> ShellGit + ShellCompose + LocalFs --> Deployer
//! Ctrl+C     --> CancellationToken
//! ```

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cli::deploy::DeployArgs;
use crate::compose::ShellCompose;
use crate::config::Config;
use crate::deploy::Deployer;
use crate::error::Result;
use crate::fs::LocalFs;
use crate::git::ShellGit;

/// Run the deploy command.
///
/// # Errors
///
/// Returns the [`DeployError`](crate::error::DeployError) of a failed
/// deployment; the detailed cause is in the log.
pub async fn run_deploy_command(args: &DeployArgs, config: &Config) -> Result<()> {
    let deployer = Deployer::new(
        ShellGit::from_config(&config.git),
        ShellCompose::from_config(&config.compose),
        LocalFs,
    );

    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, interrupting deployment...");
            signal_token.cancel();
        }
    });

    let result = deployer.deploy(&args.to_request(), &cancel_token).await;
    signal_task.abort();
    result?;
    Ok(())
}
