// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for building and running checker tasks.

use crate::prelude::*;

fn python_repo(config: &str) -> Repo {
    let repo = Repo::new();
    repo.config(config);
    repo
}

#[test]
fn passing_file_checker() {
    let repo = python_repo(
        "config:\n  pep8: {executable: 'true'}\nfile-checkers:\n  '*.py': [pep8]\n",
    );
    repo.file("module.py", "x = 1\n");
    repo.stage(&["module.py"]);

    check(repo.path())
        .passes()
        .stdout_eq(&format!("PEP8 module.py: OK\n{}\nOK\n", separator()));
}

#[test]
fn failing_file_checker_aborts_commit() {
    let repo = python_repo(
        "config:\n  pep8: {executable: 'false'}\nfile-checkers:\n  '*.py': [pep8]\n",
    );
    repo.file("module.py", "x = 1\n");
    repo.stage(&["module.py"]);

    check(repo.path())
        .fails()
        .stdout_has("PEP8 module.py: FAILED")
        .stdout_has("Commit aborted");
}

#[test]
fn failure_output_is_shown_indented() {
    let repo = Repo::new();
    let lint = repo.script("tools/lint", "echo \"$1:1:1: E101 bad indent\"\nexit 1");
    repo.config(&format!(
        "config:\n  pep257: {{executable: '{}'}}\nfile-checkers:\n  '*.py': [pep257]\n",
        lint.display()
    ));
    repo.file("a.py", "x = 1\n");
    repo.stage(&["a.py"]);

    check(repo.path())
        .fails()
        .stdout_has("a.py: FAILED\n")
        .stdout_has(predicates::str::is_match(r"(?m)^  /\S*/a\.py:1:1: E101 bad indent$").unwrap());
}

#[test]
fn one_task_per_staged_file() {
    let repo = python_repo(
        "config:\n  pep8: {executable: 'true'}\nfile-checkers:\n  '*.py': [pep8]\n",
    );
    repo.file("module.py", "");
    repo.file("module2.py", "");
    repo.file("README.md", "");
    repo.stage(&["module.py", "module2.py", "README.md"]);

    let json = check(repo.path()).json().passes();
    assert_eq!(json.task_names(), ["PEP8 module.py", "PEP8 module2.py"]);
}

#[test]
fn unstaged_files_are_not_checked() {
    let repo = python_repo(
        "config:\n  pep8: {executable: 'false'}\nfile-checkers:\n  '*.py': [pep8]\n",
    );
    repo.file("untracked.py", "");

    let json = check(repo.path()).json().passes();
    assert!(json.results().is_empty());
}

#[test]
fn committed_files_are_not_rechecked() {
    let repo = python_repo(
        "config:\n  pep8: {executable: 'false'}\nfile-checkers:\n  '*.py': [pep8]\n",
    );
    repo.file("old.py", "");
    repo.stage(&["old.py"]);
    repo.commit("initial");
    repo.file("new.py", "");
    repo.stage(&["new.py"]);

    let json = check(repo.path()).json().fails();
    assert_eq!(json.task_names(), ["PEP8 new.py"]);
}

#[test]
fn deleted_files_are_skipped() {
    let repo = python_repo(
        "config:\n  pep8: {executable: 'true'}\nfile-checkers:\n  '*.py': [pep8]\n",
    );
    repo.file("gone.py", "");
    repo.stage(&["gone.py"]);
    repo.commit("initial");
    repo.git(&["rm", "-q", "gone.py"]);

    let json = check(repo.path()).json().passes();
    assert!(json.results().is_empty());
}

#[test]
fn most_specific_pattern_wins() {
    let repo = python_repo(
        "config:\n  pep8: {executable: 'true'}\n  pep257: {executable: 'true'}\n\
         file-checkers:\n  '*.py': [pep8]\n  'tests/*.py': [pep257]\n",
    );
    repo.file("module.py", "");
    repo.file("tests/module2.py", "");
    repo.stage(&["module.py", "tests/module2.py"]);

    let json = check(repo.path()).json().passes();
    assert_eq!(json.task_names(), ["PEP257 tests/module2.py", "PEP8 module.py"]);
}

#[test]
fn project_checker_runs_without_staged_files() {
    let repo = python_repo("config:\n  unittest: {executable: 'true'}\nproject-checkers: [unittest]\n");

    check(repo.path())
        .passes()
        .stdout_has("python unittest: OK");
}

#[test]
fn failing_project_checker() {
    let repo = python_repo("config:\n  unittest: {executable: 'false'}\nproject-checkers: unittest\n");

    check(repo.path())
        .fails()
        .stdout_has("python unittest: FAILED (Errors)");
}

#[test]
fn warning_does_not_fail_the_batch() {
    let repo = Repo::new();
    let pylint = repo.script(
        "tools/pylint",
        "echo 'a.py:1: [C0111] Missing docstring'\necho 'Your code has been rated at 9.50/10'",
    );
    repo.config(&format!(
        "config:\n  pylint: {{executable: '{}'}}\nfile-checkers:\n  '*.py': [pylint]\n",
        pylint.display()
    ));
    repo.file("a.py", "");
    repo.stage(&["a.py"]);

    check(repo.path())
        .passes()
        .stdout_has("Pylint a.py: WARNING (Code Rate 9.50/10)")
        .stdout_has("  a.py:1: [C0111] Missing docstring")
        .stdout_has(format!("{}\nOK\n", separator()).as_str());
}

#[test]
fn inline_code_rate_override() {
    let repo = Repo::new();
    let pylint = repo.script("tools/pylint", "echo 'Your code has been rated at 7.50/10'");
    repo.config(&format!(
        "config:\n  pylint: {{executable: '{}', accepted-code-rate: 8}}\n\
         file-checkers:\n  '*.py': [pylint]\n  'tests/*.py':\n    - pylint: {{accepted-code-rate: 7}}\n",
        pylint.display()
    ));
    repo.file("module.py", "");
    repo.file("tests/test_module.py", "");
    repo.stage(&["module.py", "tests/test_module.py"]);

    let json = check(repo.path()).json().fails();
    assert_eq!(json.require("Pylint tests/test_module.py")["status"], "warning");
    assert_eq!(json.require("Pylint module.py")["status"], "error");
    assert_eq!(
        json.require("Pylint module.py")["summary"],
        "Failed: Code Rate 7.50/10"
    );
}

#[test]
fn tasks_run_from_repository_root() {
    let repo = Repo::new();
    let pwd = repo.script("tools/pwd", "pwd\nexit 1");
    repo.config(&format!(
        "config:\n  unittest: {{executable: '{}'}}\nproject-checkers: [unittest]\n",
        pwd.display()
    ));
    repo.file("sub/dir/keep", "");

    let root = repo.path().canonicalize().unwrap();
    let json = check(&repo.path().join("sub/dir")).json().fails();
    let message = json.require("python unittest")["message"].as_str().unwrap();
    let reported = std::path::Path::new(message.trim()).canonicalize().unwrap();
    assert_eq!(reported, root);
}

#[test]
fn missing_tool_is_a_failed_result() {
    let repo = python_repo(
        "config:\n  pep8: {executable: codechecker-missing-tool}\nfile-checkers:\n  '*.py': [pep8]\n",
    );
    repo.file("a.py", "");
    repo.stage(&["a.py"]);

    check(repo.path())
        .fails()
        .stdout_has("PEP8 a.py: FAILED")
        .stdout_has("failed to execute codechecker-missing-tool");
}

#[test]
fn results_keep_submission_order_with_many_jobs() {
    let repo = Repo::new();
    let slow = repo.script("tools/slow", "sleep 0.3");
    repo.config(&format!(
        "config:\n  pep8: {{executable: '{}'}}\n  pep257: {{executable: 'true'}}\n\
         file-checkers:\n  '*.py': [pep8, pep257]\n",
        slow.display()
    ));
    repo.file("a.py", "");
    repo.stage(&["a.py"]);

    let json = check(repo.path()).args(&["-j", "4"]).json().passes();
    assert_eq!(json.task_names(), ["PEP8 a.py", "PEP257 a.py"]);
}

#[test]
fn no_config_means_nothing_to_check() {
    let repo = Repo::new();
    repo.file("a.py", "");
    repo.stage(&["a.py"]);

    let json = check(repo.path()).json().passes();
    assert!(json.results().is_empty());
    assert_eq!(json.value()["passed"], true);
}
