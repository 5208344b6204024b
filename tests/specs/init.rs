// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `codechecker init`.

use crate::prelude::*;

fn init(dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    codechecker_cmd()
        .arg("init")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

#[test]
fn installs_hook_and_config() {
    let repo = Repo::new();
    let output = init(repo.path(), &[]);
    assert!(output.status.success());

    let hook = std::fs::read_to_string(repo.path().join(".git/hooks/pre-commit")).unwrap();
    assert!(hook.starts_with("#!/bin/sh"));
    assert!(hook.contains("codechecker check"));
    assert!(repo.path().join("precommit-checkers.yml").exists());
}

#[test]
fn starter_config_passes() {
    let repo = Repo::new();
    assert!(init(repo.path(), &[]).status.success());
    repo.file("a.py", "");
    repo.stage(&["a.py"]);

    check(repo.path()).passes();
}

#[test]
fn existing_config_is_kept() {
    let repo = Repo::new();
    repo.config("project-checkers: [unittest]\n");

    let output = init(repo.path(), &[]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--force"));
    assert_eq!(
        std::fs::read_to_string(repo.path().join("precommit-checkers.yml")).unwrap(),
        "project-checkers: [unittest]\n"
    );
}

#[test]
fn force_overwrites_config() {
    let repo = Repo::new();
    repo.config("project-checkers: [unittest]\n");

    assert!(init(repo.path(), &["--force"]).status.success());
    let config = std::fs::read_to_string(repo.path().join("precommit-checkers.yml")).unwrap();
    assert!(config.starts_with('#'));
}

#[test]
fn outside_git_repository() {
    let dir = Repo::plain();
    let output = init(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("git repository"));
}
