// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process management shared by the git and compose backends.
//!
//! ```text
//!          core
//!           |
//!        process
//!           |
//!   Builder / Output / Flags
//! ```

pub mod process;
