// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File pattern specificity.
//!
//! Patterns from `file-checkers` are ordered from most to least specific and
//! every staged file is claimed by the first pattern that matches it, so a
//! file under `tests/` configured by both `tests/*.py` and `*.py` only gets
//! the `tests/*.py` checkers.
//!
//! Patterns use shell-style globbing where `*` also matches `/`.

use std::collections::HashSet;

use globset::{Glob, GlobMatcher};

use crate::error::{Error, Result};

/// A compiled file pattern.
#[derive(Debug, Clone)]
pub struct FilePattern {
    pattern: String,
    matcher: GlobMatcher,
}

impl FilePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = Glob::new(pattern).map_err(|e| Error::Config {
            message: format!("invalid file pattern \"{pattern}\": {e}"),
            path: None,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

/// Order patterns from most to least specific.
///
/// Insertion sort: each pattern goes right before the first already placed
/// pattern whose glob matches the new pattern's text, or at the end if there
/// is none. Unrelated patterns keep their encounter order.
pub fn sort_by_specificity(patterns: impl IntoIterator<Item = FilePattern>) -> Vec<FilePattern> {
    let mut sorted: Vec<FilePattern> = Vec::new();
    for pattern in patterns {
        let position = sorted.iter().position(|placed| placed.is_match(&pattern.pattern));
        match position {
            Some(index) => sorted.insert(index, pattern),
            None => sorted.push(pattern),
        }
    }
    tracing::trace!(
        "pattern order: {:?}",
        sorted.iter().map(FilePattern::as_str).collect::<Vec<_>>()
    );
    sorted
}

/// Assign staged files to the ordered patterns.
///
/// Returns, for each pattern, the files it claimed in staged order. A file is
/// claimed by at most one pattern and listed at most once. Files matching no
/// pattern are skipped.
pub fn assign_files<'f>(patterns: &[FilePattern], staged: &'f [String]) -> Vec<Vec<&'f str>> {
    let mut claimed: HashSet<&str> = HashSet::new();

    let assigned: Vec<Vec<&str>> = patterns
        .iter()
        .map(|pattern| {
            let files: Vec<&str> = staged
                .iter()
                .map(String::as_str)
                .filter(|file| !claimed.contains(file) && pattern.is_match(file))
                .collect();
            claimed.extend(files.iter().copied());
            tracing::debug!("{} claims {} files", pattern.as_str(), files.len());
            // Duplicates in the staged list are claimed once
            let mut seen = HashSet::new();
            files.into_iter().filter(|f| seen.insert(*f)).collect()
        })
        .collect();

    for file in staged {
        if !claimed.contains(file.as_str()) {
            tracing::debug!("no file checkers for {}", file);
        }
    }

    assigned
}

#[cfg(test)]
#[path = "patterns_tests.rs"]
mod tests;
