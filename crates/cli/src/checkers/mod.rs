// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Checker specifications and the registry that holds them.
//!
//! A [`CheckerSpec`] describes how to turn a checker name plus configuration
//! into an executable [`Task`]. Specs are validated when registered, so a
//! template referencing an undeclared option is rejected before any config
//! file is read.

pub mod builtin;
pub mod result_creators;

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::config::{CheckerConfig, OptionMap};
use crate::error::{Error, Result};
use crate::task::{
    OPTIONS_PLACEHOLDER, ResultCreator, Task, VALUE_PLACEHOLDER, build_command,
    create_result_by_returncode,
};
use crate::template::Template;

/// Placeholder for the file path (absolute in commands, relative in task names).
pub const FILE_PATH: &str = "file_path";
/// Placeholder for the absolute file path.
pub const FILE_ABSPATH: &str = "file_abspath";
/// Placeholder for the repository-relative file path.
pub const FILE_RELPATH: &str = "file_relpath";

const FILE_PLACEHOLDERS: [&str; 3] = [FILE_PATH, FILE_ABSPATH, FILE_RELPATH];

/// Whether a checker runs once per project or once per staged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckerKind {
    Project,
    File,
}

impl CheckerKind {
    fn placeholders(self) -> &'static [&'static str] {
        match self {
            CheckerKind::Project => &[],
            CheckerKind::File => &FILE_PLACEHOLDERS,
        }
    }
}

impl fmt::Display for CheckerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckerKind::Project => write!(f, "project checker"),
            CheckerKind::File => write!(f, "file checker"),
        }
    }
}

/// Static description of one checker type.
#[derive(Debug, Clone)]
pub struct CheckerSpec {
    name: String,
    kind: CheckerKind,
    task_name: Template,
    command: Template,
    defaults: OptionMap,
    /// Options the result creator reads as numbers.
    numeric: Vec<String>,
    command_options: IndexMap<String, Template>,
    create_result: ResultCreator,
}

impl CheckerSpec {
    /// Describe a checker that runs once per invocation.
    pub fn project(name: impl Into<String>, task_name: &str, command: &str) -> Result<Self> {
        Self::new(name.into(), CheckerKind::Project, task_name, command)
    }

    /// Describe a checker that runs once per matched staged file.
    pub fn file(name: impl Into<String>, task_name: &str, command: &str) -> Result<Self> {
        Self::new(name.into(), CheckerKind::File, task_name, command)
    }

    fn new(name: String, kind: CheckerKind, task_name: &str, command: &str) -> Result<Self> {
        Ok(Self {
            name,
            kind,
            task_name: Template::parse(task_name)?,
            command: Template::parse(command)?,
            defaults: OptionMap::new(),
            numeric: Vec::new(),
            command_options: IndexMap::new(),
            create_result: create_result_by_returncode,
        })
    }

    /// Declare an option with its default value (`Value::Null` for absent).
    pub fn with_option(mut self, option: impl Into<String>, default: impl Into<Value>) -> Self {
        self.defaults.insert(option.into(), default.into());
        self
    }

    /// Declare an option whose value must be a number.
    pub fn with_numeric_option(self, option: impl Into<String>, default: impl Into<Value>) -> Self {
        let option = option.into();
        let mut spec = self.with_option(option.clone(), default);
        spec.numeric.push(option);
        spec
    }

    /// Attach a command-line fragment template to a declared option.
    pub fn with_command_option(mut self, option: impl Into<String>, template: &str) -> Result<Self> {
        self.command_options
            .insert(option.into(), Template::parse(template)?);
        Ok(self)
    }

    pub fn with_result_creator(mut self, create_result: ResultCreator) -> Self {
        self.create_result = create_result;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CheckerKind {
        self.kind
    }

    /// Configuration holding only the built-in defaults.
    pub fn default_config(&self) -> CheckerConfig {
        CheckerConfig::new(self.name.clone(), self.defaults.clone())
    }

    /// Check option values against their declared types.
    pub fn check_values(&self, config: &CheckerConfig) -> Result<()> {
        for option in &self.numeric {
            config.get_f64(option)?;
        }
        Ok(())
    }

    /// Build the single task of a project checker.
    pub fn project_task(&self, config: CheckerConfig) -> Result<Task> {
        self.check_values(&config)?;
        let name = self.task_name.substitute(&HashMap::new())?;
        let argv = build_command(
            &self.command,
            &self.command_options,
            &config,
            &[],
        )?;
        Task::new(name, argv, config, self.create_result)
    }

    /// Build the task checking one file.
    pub fn file_task(&self, config: CheckerConfig, relpath: &str, abspath: &str) -> Result<Task> {
        self.check_values(&config)?;
        let name = self.task_name.substitute(&HashMap::from([
            (FILE_PATH, relpath.to_string()),
            (FILE_RELPATH, relpath.to_string()),
            (FILE_ABSPATH, abspath.to_string()),
        ]))?;
        let argv = build_command(
            &self.command,
            &self.command_options,
            &config,
            &[
                (FILE_PATH, abspath),
                (FILE_ABSPATH, abspath),
                (FILE_RELPATH, relpath),
            ],
        )?;
        Task::new(name, argv, config, self.create_result)
    }

    fn validate(&self) -> Result<()> {
        let file_placeholders = self.kind.placeholders();

        for option in self.defaults.keys() {
            if option == OPTIONS_PLACEHOLDER || FILE_PLACEHOLDERS.contains(&option.as_str()) {
                return Err(Error::InvalidOptionValue {
                    checker: self.name.clone(),
                    option: option.clone(),
                    reason: "option name is reserved".to_string(),
                });
            }
        }

        for placeholder in self.command.placeholders() {
            let known = placeholder == OPTIONS_PLACEHOLDER
                || self.defaults.contains_key(placeholder)
                || file_placeholders.contains(&placeholder);
            if !known {
                return Err(Error::template(
                    self.command.source(),
                    format!("\"{placeholder}\" is not an option of {}", self.name),
                ));
            }
        }

        for placeholder in self.task_name.placeholders() {
            if !file_placeholders.contains(&placeholder) {
                return Err(Error::template(
                    self.task_name.source(),
                    format!("task names cannot reference \"{placeholder}\""),
                ));
            }
        }

        let uses_options = self.command.references(OPTIONS_PLACEHOLDER);
        for (option, template) in &self.command_options {
            if !self.defaults.contains_key(option) {
                return Err(Error::InvalidConfigOption {
                    checker: self.name.clone(),
                    option: option.clone(),
                });
            }
            if let Some(bad) = template.placeholders().find(|p| *p != VALUE_PLACEHOLDER) {
                return Err(Error::template(
                    template.source(),
                    format!("option templates can only reference \"value\", not \"{bad}\""),
                ));
            }
            if !uses_options && !self.command.references(option) {
                return Err(Error::template(
                    self.command.source(),
                    format!("option \"{option}\" is never rendered"),
                ));
            }
        }

        Ok(())
    }
}

/// Immutable-after-startup table of checker specifications.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    project: IndexMap<String, CheckerSpec>,
    file: IndexMap<String, CheckerSpec>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in checker.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        builtin::register(&mut registry)?;
        Ok(registry)
    }

    /// Validate and add a checker.
    ///
    /// Checker names are unique across both kinds so a `config` section entry
    /// always names exactly one checker.
    pub fn register(&mut self, spec: CheckerSpec) -> Result<()> {
        spec.validate()?;
        if self.find(&spec.name).is_some() {
            return Err(Error::Internal(format!(
                "checker \"{}\" registered twice",
                spec.name
            )));
        }
        tracing::trace!("registered {} {}", spec.kind, spec.name);
        match spec.kind {
            CheckerKind::Project => self.project.insert(spec.name.clone(), spec),
            CheckerKind::File => self.file.insert(spec.name.clone(), spec),
        };
        Ok(())
    }

    /// Look up a checker of the given kind.
    pub fn get(&self, kind: CheckerKind, name: &str) -> Result<&CheckerSpec> {
        let table = match kind {
            CheckerKind::Project => &self.project,
            CheckerKind::File => &self.file,
        };
        table.get(name).ok_or_else(|| Error::InvalidChecker {
            name: name.to_string(),
            kind,
        })
    }

    /// Look up a checker of either kind.
    pub fn find(&self, name: &str) -> Option<&CheckerSpec> {
        self.project.get(name).or_else(|| self.file.get(name))
    }

    /// Names of registered checkers of one kind, in registration order.
    pub fn names(&self, kind: CheckerKind) -> impl Iterator<Item = &str> {
        let table = match kind {
            CheckerKind::Project => &self.project,
            CheckerKind::File => &self.file,
        };
        table.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
