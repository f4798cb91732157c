// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |              deploy / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, env, --set        |
//!              '-------------+-------------'
//!                            v
//!              ,---------------------------,
//!              |          deploy           |
//!              |  Deployer<V, C, F>        |
//!              '--+--------+--------+------'
//!                 |        |        |
//!                 v        v        v
//!               git     compose     fs
//!            VcsClient  Engine   FileSystem
//!            ShellGit   Shell..  LocalFs, DirectoryManager
//!                 |        |
//!                 +---+----+
//!                     v
//!   +-----------------------------------------+
//!   |  core::process   async spawn, cancel    |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, auth, repo|
//!   +-----------------------------------------+
//! ```

pub mod auth;
pub mod cli;
pub mod cmd;
pub mod compose;
pub mod config;
pub mod core;
pub mod deploy;
pub mod error;
pub mod fs;
pub mod git;
pub mod logging;
pub mod repo;
