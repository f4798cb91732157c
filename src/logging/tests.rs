// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogFormat, LogLevel};

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(6).is_ok());
    assert!(LogLevel::new(7).is_err());
    assert_eq!(LogLevel::new(4).ok(), Some(LogLevel::DEBUG));
    assert_eq!(u8::from(LogLevel::TRACE), 5);
}

#[test]
fn test_log_level_filters() {
    let filters: Vec<_> = (0..=6)
        .filter_map(|level| LogLevel::new(level).ok())
        .map(LogLevel::to_filter_string)
        .collect();

    assert_eq!(
        filters,
        [
            "off",
            "stackdeploy=error",
            "stackdeploy=warn",
            "stackdeploy=info",
            "stackdeploy=debug",
            "stackdeploy=trace",
            "trace",
        ]
    );
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();

    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert_eq!(config.format(), LogFormat::Text);
    assert!(config.log_file().is_none());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::WARN)
        .with_format(LogFormat::Json)
        .maybe_with_log_file(Some("deploy.log"))
        .build();

    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.format(), LogFormat::Json);
    assert_eq!(config.log_file(), Some(std::path::Path::new("deploy.log")));
}
