// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository address helpers.
//!
//! ```text
//! https://example.com/org/myrepo.git
//!                         ^^^^^^ ---> "myrepo"
//! ```

use crate::error::{DeployError, DeployResult};

/// Suffix stripped from the last address segment.
pub const VCS_SUFFIX: &str = ".git";

/// Derive the local directory name for a repository address.
///
/// Takes the segment after the last `/` and strips one trailing [`VCS_SUFFIX`].
///
/// # Errors
///
/// Returns [`DeployError::InvalidRepositoryAddress`] if the address has no `/`
/// or the derived name is empty, `.` or `..`.
pub fn resolve_repository_name(address: &str) -> DeployResult<String> {
    let Some((_, last)) = address.rsplit_once('/') else {
        return Err(DeployError::invalid_address(address));
    };
    let name = last.strip_suffix(VCS_SUFFIX).unwrap_or(last);
    if matches!(name, "" | "." | "..") {
        return Err(DeployError::invalid_address(address));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests;
