// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::new("git")
//!   .args() .cwd() .env() .capture_stderr()
//!   .run_with_cancellation(token)
//!       --> tokio::process::Command
//!           stream stdout/stderr
//!           kill on cancel
//!       --> ProcessOutput { exit_code, stderr, interrupted }
//! ```

pub mod builder;
mod io;
mod runner;
