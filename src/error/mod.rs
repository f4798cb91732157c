// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            DeployError (caller-visible, ~24 bytes)
//!                     |
//!      +--------------+---------------+
//!      v              v               v
//!  InvalidRepo   DirectoryPrep   DeploymentFailure
//!   Box<str>    Box<io::Error>      (sentinel)
//!
//! Internal errors (logged, collapsed into DeploymentFailure):
//!   Git      CloneFailed, Interrupted, Process
//!   Compose  BinaryNotFound, DeployFailed, Interrupted, Process
//!   Process  SpawnFailed, NonZeroExit, Io
//!   Config   ParseError, InvalidValue, InvalidOverride
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`DeployError`].
pub type DeployResult<T> = std::result::Result<T, DeployError>;

/// Result type for VCS operations.
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Result type for compose engine operations.
pub type ComposeResult<T> = std::result::Result<T, ComposeError>;

/// Result type for child process operations.
pub type ProcessResult<T> = std::result::Result<T, ProcessError>;

/// Outcome of a deployment as seen by the caller.
///
/// Fetch and deploy failures carry no detail here; the cause is logged.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The repository address has no path separator to derive a name from.
    #[error("invalid repository address '{0}'")]
    InvalidRepositoryAddress(Box<str>),

    /// Filesystem error while moving an existing destination aside.
    #[error(transparent)]
    DirectoryPreparation(Box<std::io::Error>),

    /// The stack was not deployed.
    #[error("compose stack deployment failure")]
    DeploymentFailure,
}

impl DeployError {
    /// Create an [`DeployError::InvalidRepositoryAddress`] for `address`.
    pub fn invalid_address(address: impl Into<String>) -> Self {
        Self::InvalidRepositoryAddress(address.into().into_boxed_str())
    }

    /// The underlying filesystem error, if this is a preparation failure.
    #[must_use]
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            Self::DirectoryPreparation(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Returns true for the coarse deployment sentinel.
    #[must_use]
    pub const fn is_deployment_failure(&self) -> bool {
        matches!(self, Self::DeploymentFailure)
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $target:ident :: $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for $target {
                fn from(err: $error) -> Self {
                    $target::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    std::io::Error => DeployError::DirectoryPreparation,
    ProcessError => GitError::Process,
    ProcessError => ComposeError::Process,
}

// --- Git Errors ---

/// VCS client errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Clone did not complete.
    #[error("failed to clone '{url}': {message}")]
    CloneFailed { url: String, message: String },

    /// Clone was cancelled before it finished.
    #[error("clone of '{url}' was interrupted")]
    Interrupted { url: String },

    /// The git process could not be run.
    #[error("git process error: {0}")]
    Process(Box<ProcessError>),
}

// --- Compose Errors ---

/// Compose deployment engine errors.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The configured compose binary could not be resolved.
    #[error("compose binary not found: '{0}'")]
    BinaryNotFound(String),

    /// `up` exited unsuccessfully.
    #[error("compose deployment in '{working_dir}' failed: {message}")]
    DeployFailed {
        working_dir: String,
        message: String,
    },

    /// Deployment was cancelled before it finished.
    #[error("compose deployment in '{0}' was interrupted")]
    Interrupted(String),

    /// The compose process could not be run.
    #[error("compose process error: {0}")]
    Process(Box<ProcessError>),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration sources.
    #[error("failed to parse configuration: {message}")]
    ParseError { message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// A `--set` override is not of the form `section.key=value`.
    #[error("invalid override '{0}', expected 'section.key=value'")]
    InvalidOverride(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with an unexpected status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// I/O failure while talking to a running process.
    #[error("i/o error on process '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
