// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git access for staged file detection.
//!
//! Uses git2 (libgit2) for all git operations to avoid subprocess overhead.
//!
//! ## Staged Files
//!
//! Staged files are the HEAD tree diffed against the index:
//! - Added, modified and type-changed files: path from `new_file()`
//! - Renamed files: both the deletion and the addition show up (no rename
//!   detection), and only the addition is kept
//! - Deleted files are dropped since there is nothing left to check

use std::path::{Path, PathBuf};

use git2::{Delta, Repository};

use crate::error::{Error, Result};

/// Version-control collaborator used to build file checker tasks.
pub trait Vcs {
    /// Work tree root.
    fn root(&self) -> &Path;

    /// Repository-relative paths of staged files, in index order.
    fn staged_files(&self) -> Result<Vec<String>>;

    /// Absolute path of a repository-relative path.
    fn abspath(&self, relpath: &str) -> PathBuf {
        self.root().join(relpath)
    }
}

/// A git repository with a work tree.
pub struct GitRepo {
    repo: Repository,
    root: PathBuf,
}

impl GitRepo {
    /// Open the repository containing `path`.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)?;
        let root = repo
            .workdir()
            .ok_or_else(|| Error::Git(git2::Error::from_str("repository has no work tree")))?
            .to_path_buf();
        tracing::debug!("repository root {}", root.display());
        Ok(Self { repo, root })
    }

    /// The `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }
}

impl Vcs for GitRepo {
    fn root(&self) -> &Path {
        &self.root
    }

    fn staged_files(&self) -> Result<Vec<String>> {
        // Handle empty repo with no commits
        let head_tree = match self.repo.head() {
            Ok(head) => Some(head.peel_to_tree()?),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
            Err(e) => return Err(e.into()),
        };

        let index = self.repo.index()?;
        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), Some(&index), None)?;

        let mut files = Vec::new();
        for delta in diff.deltas() {
            if delta.status() == Delta::Deleted {
                continue;
            }
            if let Some(path) = delta.new_file().path() {
                files.push(path.to_string_lossy().into_owned());
            }
        }

        tracing::debug!("{} staged files", files.len());
        Ok(files)
    }
}

/// Check if a path is in a git repository.
pub fn is_git_repo(root: &Path) -> bool {
    Repository::discover(root).is_ok()
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
