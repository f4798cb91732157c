// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for stackdeploy.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. stackdeploy.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. STACKDEPLOY_* env vars
//! 5. --set section.key=value and CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! STACKDEPLOY_GIT__PROGRAM=/opt/git/bin/git  → git.program
//! STACKDEPLOY_COMPOSE__FORCE_RECREATE=true   → compose.force_recreate
//! STACKDEPLOY_GLOBAL__OUTPUT_LOG_LEVEL=4     → global.output_log_level
//! ```
//!
//! Sections and keys are separated by `__` since keys contain `_`.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use types::{ComposeConfig, GitConfig, GlobalConfig};

/// Name of the configuration file picked up from the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "stackdeploy.toml";

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "STACKDEPLOY";

/// Complete application configuration.
///
/// Unknown top-level keys are ignored so unrelated `STACKDEPLOY_*` variables
/// (such as the password) do not break loading; unknown keys inside a section
/// are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Git client options.
    pub git: GitConfig,
    /// Compose engine options.
    pub compose: ComposeConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stackdeploy::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("stackdeploy.toml")
    ///     .with_env_prefix("STACKDEPLOY")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Format configuration options for display, one `key = value` per line.
    ///
    /// Output is sorted by key. Unset optional values are omitted.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_git_options(&mut options);
        self.format_compose_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        if let Some(ref log_file) = self.global.log_file {
            options.insert("global.log_file".into(), log_file.display().to_string());
        }
        options.insert(
            "global.log_format".into(),
            self.global.log_format.to_string(),
        );
    }

    fn format_git_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("git.program".into(), self.git.program.clone());
    }

    fn format_compose_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("compose.program".into(), self.compose.program.clone());
        options.insert("compose.plugin".into(), self.compose.plugin.to_string());
        if let Some(ref host) = self.compose.host {
            options.insert("compose.host".into(), host.clone());
        }
        if let Some(ref env_file) = self.compose.env_file {
            options.insert("compose.env_file".into(), env_file.display().to_string());
        }
        options.insert(
            "compose.force_recreate".into(),
            self.compose.force_recreate.to_string(),
        );
        options.insert(
            "compose.remove_orphans".into(),
            self.compose.remove_orphans.to_string(),
        );
    }
}
