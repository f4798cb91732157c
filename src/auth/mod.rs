// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git credentials.
//!
//! ```text
//! (username, password) --> Credential::derive
//!   password empty   --> None
//!   username empty   --> ("token", password)
//!   otherwise        --> (username, password)
//!
//! Credential --> basic_auth_header()  "Authorization: Basic <b64>"
//! ```
//!
//! The password lives in a [`SecretString`]; every `Debug`/`Display` rendering
//! prints [`REDACTED`] in its place.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};

/// Username used when only a password (token) is supplied.
pub const TOKEN_USERNAME: &str = "token";

/// Placeholder printed instead of secrets.
pub const REDACTED: &str = "<redacted>";

/// HTTP basic credentials for the VCS transport.
pub struct Credential {
    username: String,
    password: SecretString,
}

impl Credential {
    /// Derive a credential from an optional username/password pair.
    ///
    /// Returns `None` when `password` is empty.
    #[must_use]
    pub fn derive(username: &str, password: &str) -> Option<Self> {
        if password.is_empty() {
            return None;
        }
        let username = if username.is_empty() {
            TOKEN_USERNAME
        } else {
            username
        };
        Some(Self {
            username: username.to_string(),
            password: SecretString::from(password.to_string()),
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Exposes the password. Never pass the result to a log statement.
    #[must_use]
    pub fn expose_password(&self) -> &str {
        self.password.expose_secret()
    }

    /// `Authorization` header value for HTTP basic auth.
    #[must_use]
    pub fn basic_auth_header(&self) -> SecretString {
        let raw = format!("{}:{}", self.username, self.password.expose_secret());
        SecretString::from(format!("Authorization: Basic {}", STANDARD.encode(raw)))
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{REDACTED}", self.username)
    }
}
