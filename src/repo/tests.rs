// stackdeploy: Compose stack deployer from Git
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::resolve_repository_name;
use crate::error::DeployError;

#[test]
fn test_resolve_https_address() {
    assert_eq!(
        resolve_repository_name("https://example.com/org/myrepo.git").unwrap(),
        "myrepo"
    );
}

#[test]
fn test_resolve_without_suffix() {
    assert_eq!(
        resolve_repository_name("https://example.com/org/stack").unwrap(),
        "stack"
    );
}

#[test]
fn test_resolve_scp_style_address() {
    assert_eq!(
        resolve_repository_name("git@example.com:org/infra.git").unwrap(),
        "infra"
    );
}

#[test]
fn test_only_one_suffix_stripped() {
    assert_eq!(
        resolve_repository_name("https://example.com/org/odd.git.git").unwrap(),
        "odd.git"
    );
}

#[test]
fn test_no_separator_is_invalid() {
    for address in ["myrepo.git", "", "example.com:repo"] {
        let err = resolve_repository_name(address).expect_err(address);
        assert!(
            matches!(err, DeployError::InvalidRepositoryAddress(ref a) if &**a == address),
            "unexpected error for {address:?}: {err:?}"
        );
    }
}

#[test]
fn test_empty_name_is_invalid() {
    for address in ["https://example.com/org/", "https://example.com/org/.git"] {
        assert!(matches!(
            resolve_repository_name(address),
            Err(DeployError::InvalidRepositoryAddress(_))
        ));
    }
}

#[test]
fn test_dot_names_are_invalid() {
    for address in [
        "https://example.com/org/..",
        "https://example.com/org/.",
        "https://example.com/org/...git",
        "https://example.com/org/..git",
    ] {
        let err = resolve_repository_name(address).expect_err(address);
        assert!(
            matches!(err, DeployError::InvalidRepositoryAddress(_)),
            "unexpected error for {address:?}: {err:?}"
        );
    }
}

#[test]
fn test_dotted_name_is_kept() {
    assert_eq!(
        resolve_repository_name("https://example.com/org/.config.git").unwrap(),
        ".config"
    );
}
