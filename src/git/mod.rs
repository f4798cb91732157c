// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! VCS client port.
//!
//! ```text
//!   Deployer --clone_repository--> VcsClient (trait)
//!                                     |
//!                                     v
//!                                 ShellGit
//!                      git clone --quiet --depth N -- <url> <dest>
//!                      auth: GIT_CONFIG_* http.extraHeader (env, not argv)
//! ```

pub mod shell;

#[cfg(test)]
mod tests;

use futures_util::future::BoxFuture;
use std::path::Path;
use tokio_util::sync::CancellationToken;

use crate::auth::Credential;
use crate::error::GitResult;

pub use shell::ShellGit;

/// Shallow clone depth used for deployments.
pub const DEFAULT_CLONE_DEPTH: u32 = 1;

/// What to fetch and how.
#[derive(Debug)]
pub struct CloneOptions {
    url: String,
    credential: Option<Credential>,
    depth: u32,
}

impl CloneOptions {
    /// Options for a shallow clone of `url`.
    pub fn new(url: impl Into<String>, credential: Option<Credential>) -> Self {
        Self {
            url: url.into(),
            credential,
            depth: DEFAULT_CLONE_DEPTH,
        }
    }

    #[must_use]
    pub const fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }
}

/// Fetches a repository snapshot into a local directory.
pub trait VcsClient: Send + Sync {
    /// Clone `options.url()` into `dest`.
    ///
    /// Implementations stop work and return an error when `token` is cancelled.
    fn clone_repository<'a>(
        &'a self,
        dest: &'a Path,
        options: &'a CloneOptions,
        token: CancellationToken,
    ) -> BoxFuture<'a, GitResult<()>>;
}
