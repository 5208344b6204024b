// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for building git repositories and running the
//! codechecker binary against them.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the codechecker binary.
///
/// Environment that changes output or config discovery is cleared.
pub fn codechecker_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("codechecker"));
    for var in ["CODECHECKER_CONFIG", "CODECHECKER_LOG", "COLOR", "NO_COLOR"] {
        cmd.env_remove(var);
    }
    cmd
}

/// Create a check builder running in `dir`.
pub fn check(dir: &Path) -> CheckBuilder<Text> {
    CheckBuilder::new(dir)
}

/// Typestate markers for output mode
pub struct Text;
pub struct Json;

/// High-level check builder for fluent test assertions
pub struct CheckBuilder<Mode = Text> {
    dir: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    _mode: PhantomData<Mode>,
}

impl CheckBuilder<Text> {
    fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            args: Vec::new(),
            envs: Vec::new(),
            _mode: PhantomData,
        }
    }

    /// Switch to JSON output mode
    pub fn json(self) -> CheckBuilder<Json> {
        CheckBuilder {
            dir: self.dir,
            args: self.args,
            envs: self.envs,
            _mode: PhantomData,
        }
    }

    /// Assert the batch passes (exit 0)
    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    /// Assert the batch fails (exit 1)
    pub fn fails(self) -> RunAssert {
        self.exits(1)
    }
}

impl CheckBuilder<Json> {
    /// Assert the batch passes and parse the JSON output
    pub fn passes(self) -> CheckJson {
        CheckJson::parse(&self.exits(0))
    }

    /// Assert the batch fails and parse the JSON output
    pub fn fails(self) -> CheckJson {
        CheckJson::parse(&self.exits(1))
    }
}

impl<Mode: 'static> CheckBuilder<Mode> {
    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    /// Set an environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Assert a specific exit code
    pub fn exits(self, code: i32) -> RunAssert {
        let output = self.command().output().unwrap();
        assert_eq!(
            output.status.code(),
            Some(code),
            "unexpected exit status\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        RunAssert { output }
    }

    /// Build the command without running it
    fn command(self) -> Command {
        let is_json = std::any::TypeId::of::<Mode>() == std::any::TypeId::of::<Json>();
        let mut cmd = codechecker_cmd();
        cmd.arg("check");
        if is_json {
            cmd.args(["-o", "json"]);
        }
        cmd.args(&self.args);
        cmd.current_dir(&self.dir);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }
}

/// Result of a check run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected
    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout(), expected);
        self
    }

    /// Assert stdout matches predicate.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = self.stdout();
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = self.stdout();
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = self.stderr();
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

/// Parsed JSON output of one run
pub struct CheckJson {
    value: serde_json::Value,
}

impl CheckJson {
    fn parse(run: &RunAssert) -> Self {
        let value = serde_json::from_str(&run.stdout())
            .unwrap_or_else(|e| panic!("invalid JSON ({e}):\n{}", run.stdout()));
        Self { value }
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    pub fn results(&self) -> &Vec<serde_json::Value> {
        self.value["results"].as_array().unwrap()
    }

    /// Task names in output order
    pub fn task_names(&self) -> Vec<&str> {
        self.results()
            .iter()
            .map(|r| r["task_name"].as_str().unwrap())
            .collect()
    }

    /// Find a result by task name
    pub fn require(&self, task_name: &str) -> &serde_json::Value {
        self.results()
            .iter()
            .find(|r| r["task_name"] == task_name)
            .unwrap_or_else(|| panic!("no result for {task_name:?} in {}", self.value))
    }
}

// =============================================================================
// Repo
// =============================================================================

/// A scratch git repository.
///
/// ```ignore
/// let repo = Repo::new();
/// repo.config("file-checkers:\n  '*.py': [pep8]\n");
/// repo.file("a.py", "x = 1\n");
/// repo.stage(&["a.py"]);
/// check(repo.path()).passes();
/// ```
pub struct Repo {
    dir: tempfile::TempDir,
}

impl Repo {
    /// Create an empty repository with no commits
    pub fn new() -> Self {
        let repo = Self::plain();
        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo
    }

    /// Create a temp directory that is not a git repository
    pub fn plain() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write precommit-checkers.yml at the repository root
    pub fn config(&self, content: &str) {
        self.file("precommit-checkers.yml", content);
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Write an executable shell script and return its absolute path
    pub fn script(&self, path: &str, body: &str) -> PathBuf {
        self.file(path, &format!("#!/bin/sh\n{body}\n"));
        let full_path = self.dir.path().join(path);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&full_path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        full_path
    }

    /// Stage files in the index
    pub fn stage(&self, paths: &[&str]) {
        let mut args = vec!["add", "--"];
        args.extend_from_slice(paths);
        self.git(&args);
    }

    /// Commit everything currently staged
    pub fn commit(&self, message: &str) {
        self.git(&["commit", "-q", "-m", message]);
    }

    /// Run git in the repository, asserting success
    pub fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .env_remove("GIT_DIR")
            .env_remove("GIT_INDEX_FILE")
            .output()
            .expect("git should run");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Separator line printed before the verdict
pub fn separator() -> String {
    "-".repeat(40)
}
