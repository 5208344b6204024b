// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for configuration discovery and validation.

use crate::prelude::*;

fn repo_with(config: &str) -> Repo {
    let repo = Repo::new();
    repo.config(config);
    repo.file("a.py", "");
    repo.stage(&["a.py"]);
    repo
}

#[test]
fn unknown_top_level_key() {
    let repo = repo_with("checkers: [pep8]\n");
    check(repo.path())
        .exits(2)
        .stderr_has("codechecker: config error: precommit-checkers.yml contains invalid option \"checkers\"");
}

#[test]
fn unknown_project_checker() {
    let repo = repo_with("project-checkers: [pytest]\n");
    check(repo.path()).exits(2).stderr_has("pytest");
}

#[test]
fn unknown_file_checker() {
    let repo = repo_with("file-checkers:\n  '*.rb': [rubocop]\n");
    check(repo.path()).exits(2).stderr_has("rubocop");
}

#[test]
fn unknown_checker_option() {
    let repo = repo_with("config:\n  pylint: {accepted_code_rate: 5}\n");
    check(repo.path()).exits(2).stderr_has("accepted_code_rate");
}

#[test]
fn invalid_yaml() {
    let repo = repo_with("file-checkers: [unclosed\n");
    check(repo.path()).exits(2).stderr_has("codechecker:");
}

#[test]
fn invalid_pattern() {
    let repo = repo_with("file-checkers:\n  '[*.py': [pep8]\n");
    check(repo.path()).exits(2).stderr_has("[*.py");
}

#[test]
fn validation_happens_before_any_task_runs() {
    let repo = Repo::new();
    let marker = repo.path().join("ran");
    let touch = repo.script("tools/touch", &format!("touch '{}'", marker.display()));
    repo.config(&format!(
        "config:\n  unittest: {{executable: '{}'}}\nproject-checkers: [unittest, pytest]\n",
        touch.display()
    ));

    check(repo.path()).exits(2);
    assert!(!marker.exists());
}

#[test]
fn empty_config_passes() {
    let repo = repo_with("");
    let json = check(repo.path()).json().passes();
    assert!(json.results().is_empty());
}

#[test]
fn config_found_from_subdirectory() {
    let repo = repo_with(
        "config:\n  pep8: {executable: 'true'}\nfile-checkers:\n  '*.py': [pep8]\n",
    );
    repo.file("src/deep/keep", "");

    check(&repo.path().join("src/deep"))
        .passes()
        .stdout_has("PEP8 a.py: OK");
}

#[test]
fn explicit_config_flag() {
    let repo = repo_with("project-checkers: [pytest]\n");
    repo.file(
        "ci/checks.yml",
        "config:\n  pep8: {executable: 'true'}\nfile-checkers:\n  '*.py': [pep8]\n",
    );

    check(repo.path())
        .args(&["-C", "ci/checks.yml"])
        .passes()
        .stdout_has("PEP8 a.py: OK");
}

#[test]
fn config_from_environment() {
    let repo = repo_with("project-checkers: [pytest]\n");
    repo.file(
        "ci/checks.yml",
        "config:\n  pep8: {executable: 'true'}\nfile-checkers:\n  '*.py': [pep8]\n",
    );
    let path = repo.path().join("ci/checks.yml");

    check(repo.path())
        .env("CODECHECKER_CONFIG", path.to_str().unwrap())
        .passes();
}

#[test]
fn missing_explicit_config() {
    let repo = repo_with("");
    check(repo.path())
        .args(&["-C", "nope.yml"])
        .exits(2)
        .stderr_has("nope.yml");
}
