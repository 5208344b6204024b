// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles precommit-checkers.yml parsing. Top-level keys are validated
//! strictly; checker names and options are validated later against the
//! registry when tasks are built.

mod options;

use std::path::Path;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

pub use options::{CheckerConfig, OptionMap, option_map};

use crate::error::{Error, Result};

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["project-checkers", "file-checkers", "config"];

/// Parsed checker configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChecksConfig {
    /// Checkers run once per invocation.
    #[serde(default)]
    pub project_checkers: Entries,

    /// Glob pattern to the checkers run for each matching staged file.
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_checkers: IndexMap<String, Entries>,

    /// Global per-checker option overrides.
    #[serde(default, deserialize_with = "deserialize_global_config")]
    pub config: IndexMap<String, OptionMap>,
}

impl ChecksConfig {
    /// True when the configuration would produce no tasks.
    pub fn is_empty(&self) -> bool {
        self.project_checkers.is_empty() && self.file_checkers.values().all(Entries::is_empty)
    }
}

/// One entry of a checker list.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckerEntry {
    /// Bare checker name; uses defaults merged with global config.
    Name(String),
    /// `{name: {option: value}}`; overrides apply to this entry only.
    Configured { name: String, overrides: OptionMap },
}

impl CheckerEntry {
    pub fn name(&self) -> &str {
        match self {
            CheckerEntry::Name(name) | CheckerEntry::Configured { name, .. } => name,
        }
    }

    /// Inline overrides (empty for a bare name).
    pub fn overrides(&self) -> Option<&OptionMap> {
        match self {
            CheckerEntry::Name(_) => None,
            CheckerEntry::Configured { overrides, .. } => Some(overrides),
        }
    }

    fn from_value(value: Value) -> std::result::Result<Self, String> {
        match value {
            Value::String(name) => Ok(CheckerEntry::Name(name)),
            Value::Mapping(mapping) => {
                if mapping.len() != 1 {
                    return Err(format!(
                        "checker entry must have exactly one key, found {}",
                        mapping.len()
                    ));
                }
                let Some((key, options)) = mapping.into_iter().next() else {
                    return Err("checker entry is empty".to_string());
                };
                let Value::String(name) = key else {
                    return Err("checker name must be a string".to_string());
                };
                let overrides = match options {
                    Value::Null => OptionMap::new(),
                    other => serde_yaml::from_value(other)
                        .map_err(|e| format!("invalid options for {name}: {e}"))?,
                };
                Ok(CheckerEntry::Configured { name, overrides })
            }
            _ => Err("checker entry must be a name or a single-key mapping".to_string()),
        }
    }
}

/// A list of checker entries; YAML accepts a single entry or a sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entries(pub Vec<CheckerEntry>);

impl Entries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CheckerEntry> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Entries {
    type Item = &'a CheckerEntry;
    type IntoIter = std::slice::Iter<'a, CheckerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let items = match Value::deserialize(deserializer)? {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items,
            single => vec![single],
        };
        items
            .into_iter()
            .map(CheckerEntry::from_value)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Entries)
            .map_err(D::Error::custom)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_global_config<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, OptionMap>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Option<OptionMap>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(checker, options)| (checker, options.unwrap_or_default()))
        .collect())
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<ChecksConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config from string content.
pub fn parse(content: &str, path: &Path) -> Result<ChecksConfig> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    let value: Value = serde_yaml::from_str(content).map_err(|e| config_error(e.to_string()))?;
    let mapping = match value {
        Value::Null => return Ok(ChecksConfig::default()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(config_error("top level must be a mapping".to_string())),
    };

    for key in mapping.keys() {
        let known = key.as_str().is_some_and(|k| KNOWN_KEYS.contains(&k));
        if !known {
            let key = key
                .as_str()
                .map_or_else(|| format!("{key:?}"), str::to_string);
            return Err(config_error(format!(
                "{} contains invalid option \"{key}\"",
                file_name(path)
            )));
        }
    }

    serde_yaml::from_value(Value::Mapping(mapping)).map_err(|e| config_error(e.to_string()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
