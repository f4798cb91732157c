// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional(cwd)
//!   .add_toml_file(--config)
//!   .add_toml_str()
//!   .with_env_prefix()
//!   .apply_overrides(--set)
//!        |
//!        v
//!    build() --> Config
//! ```

use config::{Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::Config;
use crate::error::{ConfigError, Result};

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<PathBuf>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML configuration file that must exist.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_toml(path.as_ref(), true)
    }

    /// Adds a TOML configuration file that is skipped when missing.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_toml(path.as_ref(), false)
    }

    /// Adds inline TOML, layered like a file.
    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self
    }

    fn add_toml(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        if required || path.exists() {
            self.files.push(path.to_path_buf());
        }
        self
    }

    /// Read `<PREFIX>_<SECTION>__<KEY>` environment variables.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or if the value cannot be converted
    /// to a configuration value.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        Ok(self)
    }

    /// Applies `section.key=value` overrides in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] for an entry without `=`, without
    /// a section, or with an empty key.
    pub fn apply_overrides<S: AsRef<str>>(self, overrides: &[S]) -> Result<Self> {
        overrides.iter().try_fold(self, |loader, entry| {
            let (key, value) = parse_override(entry.as_ref())?;
            loader.set(key, value)
        })
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid TOML syntax.
    /// - The merged configuration cannot be deserialized into the `Config` struct.
    pub fn build(self) -> Result<Config> {
        for file in &self.files {
            debug!(file = %file.display(), "Loading configuration file");
        }

        let builder = match &self.env_prefix {
            // Env sources sit below explicit overrides regardless of call order
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let parse_error = |e: config::ConfigError| ConfigError::ParseError {
            message: e.to_string(),
        };
        let config = builder
            .build()
            .and_then(|cfg| cfg.try_deserialize::<Config>())
            .map_err(parse_error)?;
        Ok(config)
    }

    #[must_use]
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `section.key=value` into its key path and value.
fn parse_override(entry: &str) -> std::result::Result<(&str, &str), ConfigError> {
    let invalid = || ConfigError::InvalidOverride(entry.to_string());

    let (key, value) = entry.split_once('=').ok_or_else(invalid)?;
    let key = key.trim();
    let (section, name) = key.split_once('.').ok_or_else(invalid)?;
    if section.is_empty() || name.is_empty() {
        return Err(invalid());
    }
    Ok((key, value))
}
