// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for stackdeploy using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! stackdeploy [global options] <command>
//! deploy <REPOSITORY> <DESTINATION> <COMPOSE_FILE>... [-u USER] [-p PASSWORD] [-n NAME]
//! options
//! version
//! ```

pub mod deploy;
pub mod global;


use crate::cli::deploy::DeployArgs;
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Compose stack deployer from Git
#[derive(Debug, Parser)]
#[command(
    name = "stackdeploy",
    author,
    version,
    about = "Deploy a Compose stack from a Git repository",
    long_about = "stackdeploy Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Fetches a shallow clone of a Git repository into a destination\n\
                  directory and brings up the Compose stack it describes. An\n\
                  existing destination is moved aside first and removed once the\n\
                  run finishes.",
    after_help = "CONFIGURATION:\n\n\
                  stackdeploy reads `stackdeploy.toml` from the current directory\n\
                  if present, then any --config files in order, then STACKDEPLOY_*\n\
                  environment variables (e.g. STACKDEPLOY_COMPOSE__PROGRAM), then\n\
                  --set overrides. Use `stackdeploy options` to print the result."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Clones a repository and deploys its Compose stack.
    Deploy(DeployArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
