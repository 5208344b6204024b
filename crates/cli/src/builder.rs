// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Expands checker configuration into executable tasks.
//!
//! Configuration merges in three layers, lowest precedence first:
//! 1. checker defaults from the registry
//! 2. the global `config` section
//! 3. inline overrides on one `project-checkers` or `file-checkers` entry
//!
//! Every checker name and option is validated before any task is built, so a
//! typo fails the run before a single subprocess starts.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::checkers::{CheckerKind, CheckerSpec, Registry};
use crate::config::{CheckerConfig, CheckerEntry, ChecksConfig, Entries, OptionMap};
use crate::error::{Error, Result};
use crate::git::Vcs;
use crate::patterns::{FilePattern, assign_files, sort_by_specificity};
use crate::task::Task;

/// Accumulates tasks for one run.
pub struct CheckListBuilder<'a, V: Vcs + ?Sized> {
    registry: &'a Registry,
    vcs: &'a V,
    configs: HashMap<String, CheckerConfig>,
    tasks: Vec<Task>,
}

impl<'a, V: Vcs + ?Sized> CheckListBuilder<'a, V> {
    pub fn new(registry: &'a Registry, vcs: &'a V) -> Self {
        Self {
            registry,
            vcs,
            configs: HashMap::new(),
            tasks: Vec::new(),
        }
    }

    /// Merge global overrides into a checker's configuration.
    ///
    /// Applies on top of earlier `configure` calls for the same checker.
    pub fn configure(&mut self, checker: &str, overrides: &OptionMap) -> Result<()> {
        let spec = self.registry.find(checker).ok_or_else(|| Error::Config {
            message: format!("cannot configure unknown checker \"{checker}\""),
            path: None,
        })?;
        let merged = self.global_config(spec).merged(overrides)?;
        spec.check_values(&merged)?;
        tracing::debug!("configured {}", checker);
        self.configs.insert(checker.to_string(), merged);
        Ok(())
    }

    /// Add one task per project checker entry.
    pub fn add_project_checkers(&mut self, entries: &Entries) -> Result<()> {
        for entry in entries {
            let (spec, config) = self.resolve(CheckerKind::Project, entry)?;
            let task = spec.project_task(config)?;
            self.push(task);
        }
        Ok(())
    }

    /// Add one task per checker entry for a single staged file.
    pub fn add_checkers_for_file(&mut self, relpath: &str, entries: &Entries) -> Result<()> {
        let resolved = entries
            .iter()
            .map(|entry| self.resolve(CheckerKind::File, entry))
            .collect::<Result<Vec<_>>>()?;
        self.add_resolved_for_file(relpath, resolved)
    }

    /// Add file checker tasks for every staged file.
    ///
    /// Each file is checked only by the checkers of the most specific pattern
    /// that matches it.
    pub fn add_file_checkers(
        &mut self,
        file_checkers: &IndexMap<String, Entries>,
        staged: &[String],
    ) -> Result<()> {
        let mut patterns = Vec::with_capacity(file_checkers.len());
        let mut checkers_by_pattern = HashMap::new();
        for (pattern, entries) in file_checkers {
            let resolved = entries
                .iter()
                .map(|entry| self.resolve(CheckerKind::File, entry))
                .collect::<Result<Vec<_>>>()?;
            patterns.push(FilePattern::new(pattern)?);
            checkers_by_pattern.insert(pattern.as_str(), resolved);
        }

        let ordered = sort_by_specificity(patterns);
        let assigned = assign_files(&ordered, staged);

        for (pattern, files) in ordered.iter().zip(assigned) {
            let Some(resolved) = checkers_by_pattern.get(pattern.as_str()) else {
                continue;
            };
            for relpath in files {
                self.add_resolved_for_file(relpath, resolved.clone())?;
            }
        }
        Ok(())
    }

    /// The tasks built so far, in insertion order.
    pub fn into_tasks(self) -> Vec<Task> {
        tracing::debug!("built {} tasks", self.tasks.len());
        self.tasks
    }

    fn add_resolved_for_file(
        &mut self,
        relpath: &str,
        resolved: Vec<(&'a CheckerSpec, CheckerConfig)>,
    ) -> Result<()> {
        let abspath = self.vcs.abspath(relpath);
        let abspath = abspath.to_string_lossy();
        for (spec, config) in resolved {
            let task = spec.file_task(config, relpath, &abspath)?;
            self.push(task);
        }
        Ok(())
    }

    /// Look up an entry's checker and compute its effective configuration.
    fn resolve(
        &self,
        kind: CheckerKind,
        entry: &CheckerEntry,
    ) -> Result<(&'a CheckerSpec, CheckerConfig)> {
        let spec = self.registry.get(kind, entry.name())?;
        let global = self.global_config(spec);
        let config = match entry.overrides() {
            Some(overrides) => global.merged(overrides)?,
            None => global,
        };
        spec.check_values(&config)?;
        Ok((spec, config))
    }

    fn global_config(&self, spec: &CheckerSpec) -> CheckerConfig {
        self.configs
            .get(spec.name())
            .cloned()
            .unwrap_or_else(|| spec.default_config())
    }

    fn push(&mut self, task: Task) {
        tracing::trace!("task {}: {}", task.name(), task.command());
        self.tasks.push(task.with_current_dir(self.vcs.root()));
    }
}

/// Build every task described by `config`.
///
/// Staged files are only read when file checkers are configured.
pub fn build_tasks<V: Vcs + ?Sized>(
    config: &ChecksConfig,
    registry: &Registry,
    vcs: &V,
) -> Result<Vec<Task>> {
    let mut builder = CheckListBuilder::new(registry, vcs);

    for (checker, overrides) in &config.config {
        builder.configure(checker, overrides)?;
    }

    builder.add_project_checkers(&config.project_checkers)?;

    if !config.file_checkers.is_empty() {
        let staged = vcs.staged_files()?;
        builder.add_file_checkers(&config.file_checkers, &staged)?;
    }

    Ok(builder.into_tasks())
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
