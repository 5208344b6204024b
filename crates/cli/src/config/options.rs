// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Closed-world option maps for checkers.
//!
//! A checker declares its legal options (with defaults) up front. Reading or
//! writing any other option fails with `InvalidConfigOption`.

use indexmap::IndexMap;
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Option name to value, in declaration order.
pub type OptionMap = IndexMap<String, Value>;

/// Validated configuration scoped to one checker.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckerConfig {
    checker: String,
    values: OptionMap,
}

impl CheckerConfig {
    /// Create a configuration whose legal option set is the keys of `defaults`.
    pub fn new(checker: impl Into<String>, defaults: OptionMap) -> Self {
        Self {
            checker: checker.into(),
            values: defaults,
        }
    }

    /// Name of the checker this configuration belongs to.
    pub fn checker(&self) -> &str {
        &self.checker
    }

    pub fn contains(&self, option: &str) -> bool {
        self.values.contains_key(option)
    }

    /// Get an option value (`Value::Null` means absent).
    pub fn get(&self, option: &str) -> Result<&Value> {
        self.values
            .get(option)
            .ok_or_else(|| self.invalid_option(option))
    }

    /// Set a declared option.
    pub fn set(&mut self, option: &str, value: Value) -> Result<()> {
        match self.values.get_mut(option) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(self.invalid_option(option)),
        }
    }

    /// Return a copy with `overrides` applied; `self` is left untouched.
    ///
    /// Fails on the first override key that is not a declared option.
    pub fn merged(&self, overrides: &OptionMap) -> Result<Self> {
        let mut merged = self.clone();
        merged.apply(overrides)?;
        Ok(merged)
    }

    /// Apply `overrides` in place.
    ///
    /// Every key is validated before anything is written.
    pub fn apply(&mut self, overrides: &OptionMap) -> Result<()> {
        if let Some(bad) = overrides.keys().find(|k| !self.contains(k)) {
            return Err(self.invalid_option(bad));
        }
        for (option, value) in overrides {
            self.set(option, value.clone())?;
        }
        Ok(())
    }

    /// Options in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render an option value to its command-line text.
    ///
    /// `Ok(None)` for null. Sequences and mappings are rejected.
    pub fn render(&self, option: &str) -> Result<Option<String>> {
        let value = self.get(option)?;
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
                Err(Error::InvalidOptionValue {
                    checker: self.checker.clone(),
                    option: option.to_string(),
                    reason: "expected a scalar value".to_string(),
                })
            }
        }
    }

    /// Read an option as a number.
    pub fn get_f64(&self, option: &str) -> Result<f64> {
        let value = self.get(option)?;
        value.as_f64().ok_or_else(|| Error::InvalidOptionValue {
            checker: self.checker.clone(),
            option: option.to_string(),
            reason: format!("expected a number, got {}", describe(value)),
        })
    }

    fn invalid_option(&self, option: &str) -> Error {
        Error::InvalidConfigOption {
            checker: self.checker.clone(),
            option: option.to_string(),
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Build an [`OptionMap`] from literal pairs.
pub fn option_map<I, K, V>(pairs: I) -> OptionMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
