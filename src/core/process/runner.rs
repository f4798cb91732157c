// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run_with_cancellation(token)
//!              |
//!              v
//!     build_command()
//!     args, cwd, env, piped stdio
//!              |
//!              v
//!          spawn()
//!              |
//!              v
//!   run_child_with_cancellation()
//!              |
//!              v
//!    validate exit_code
//!    (skip if interrupted)
//!              |
//!              v
//!       ProcessOutput
//!    { exit_code, stderr, interrupted }
//! ```

use std::fmt::Write as _;
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessOutput};
use crate::error::{ProcessError, ProcessResult};

impl ProcessBuilder {
    /// Returns the display name for this process.
    pub(super) fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process with cancellation support.
    ///
    /// When the token is cancelled the child is killed and the output comes back
    /// with `interrupted = true`. A token that is already cancelled prevents the
    /// process from being spawned at all.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Spawning the child process fails.
    /// - The process exits with a non-zero status and was not interrupted.
    pub async fn run_with_cancellation(
        self,
        token: CancellationToken,
    ) -> ProcessResult<ProcessOutput> {
        if token.is_cancelled() {
            return Ok(ProcessOutput::new(-1, String::new(), true));
        }

        let name = self.display_name();
        let cmd_line = self.command_line();

        let mut child = self.spawn(&name, &cmd_line)?;
        let output = self
            .run_child_with_cancellation(&name, &cmd_line, &mut child, token)
            .await?;

        if !output.is_interrupted() {
            Self::check_exit(&name, &cmd_line, &output)?;
        }

        trace!(
            process = %name,
            exit_code = output.exit_code(),
            interrupted = output.is_interrupted(),
            "completed"
        );
        Ok(output)
    }

    fn spawn(&self, name: &str, cmd_line: &str) -> ProcessResult<tokio::process::Child> {
        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        let env_keys: Vec<&str> = self.env_keys().collect();
        debug!(cmd = %cmd_line, env = ?env_keys, "exec");

        let child = self
            .build_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.to_string(),
                source,
            })?;

        trace!(process = %name, pid = ?child.id(), "spawned");
        Ok(child)
    }

    fn check_exit(name: &str, cmd_line: &str, output: &ProcessOutput) -> ProcessResult<()> {
        if output.success() {
            return Ok(());
        }
        if !output.stderr().is_empty() {
            error!(process = %name, stderr = %output.stderr(), "process error output");
        }
        Err(ProcessError::NonZeroExit {
            command: cmd_line.to_string(),
            code: output.exit_code(),
        })
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());

        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        command.envs(self.environment());

        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        // The child must not outlive a cancelled deployment
        command.kill_on_drop(true);

        command
    }
}
