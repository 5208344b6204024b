// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Repository bootstrap: the pre-commit hook and a starter config.

use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::CONFIG_FILE_NAME;
use crate::error::{Error, Result};
use crate::git::{GitRepo, Vcs, is_git_repo};

/// Hook script installed as `.git/hooks/pre-commit`.
pub const HOOK_SCRIPT: &str = "#!/bin/sh\n\
# Installed by codechecker init\n\
codechecker check\n\
exit $?\n";

/// Starter configuration. Every checker is commented out, so a fresh
/// install passes until the user opts in.
pub const DEFAULT_CONFIG: &str = r#"# Checks run by `codechecker check` before each commit.
#
# project-checkers run once per commit:
#
# project-checkers: [unittest]
#
# file-checkers run once per staged file matching a pattern. Each file is
# checked only by the most specific matching pattern:
#
# file-checkers:
#   '*.py': [pylint, pep8]
#   'tests/*.py':
#     - pylint: {accepted-code-rate: 8}
#   '*.js': [jshint]
#
# config overrides checker options for every entry:
#
# config:
#   pylint:
#     rcfile: pylint.rc
"#;

/// What happened to one bootstrap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Created,
    Overwritten,
    /// Already present and `--force` was not given.
    Kept,
}

/// Outcome of bootstrapping a repository.
#[derive(Debug)]
pub struct InitReport {
    pub hook_path: PathBuf,
    pub hook: FileAction,
    pub config_path: PathBuf,
    pub config: FileAction,
}

/// Install the hook and starter config into the repository containing `cwd`.
pub fn init_repository(cwd: &Path, force: bool) -> Result<InitReport> {
    if !is_git_repo(cwd) {
        return Err(Error::Config {
            message: "not inside a git repository".to_string(),
            path: Some(cwd.to_path_buf()),
        });
    }
    let repo = GitRepo::discover(cwd)?;

    let hooks_dir = repo.git_dir().join("hooks");
    fs::create_dir_all(&hooks_dir).map_err(|source| Error::Io {
        path: hooks_dir.clone(),
        source,
    })?;

    let hook_path = hooks_dir.join("pre-commit");
    let hook = write_file(&hook_path, HOOK_SCRIPT, force)?;
    if hook != FileAction::Kept {
        make_executable(&hook_path)?;
    }

    let config_path = repo.root().join(CONFIG_FILE_NAME);
    let config = write_file(&config_path, DEFAULT_CONFIG, force)?;

    tracing::debug!("hook {:?}, config {:?}", hook, config);
    Ok(InitReport {
        hook_path,
        hook,
        config_path,
        config,
    })
}

fn write_file(path: &Path, content: &str, force: bool) -> Result<FileAction> {
    let action = match (path.exists(), force) {
        (false, _) => FileAction::Created,
        (true, true) => FileAction::Overwritten,
        (true, false) => return Ok(FileAction::Kept),
    };
    fs::write(path, content).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(action)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
