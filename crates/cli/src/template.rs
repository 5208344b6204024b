// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `$name` / `${name}` templates for commands and task names.
//!
//! Templates are parsed once when a checker is registered so the set of
//! referenced placeholders can be inspected up front. Substitution is strict:
//! every placeholder must have a value.
//!
//! Syntax:
//! - `$$` is a literal `$`
//! - `$name` where name is `[_A-Za-z][_A-Za-z0-9]*`
//! - `${name}` which additionally allows `-` (e.g. `${accepted-code-rate}`)
//! - any other `$` is an error

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

#[allow(clippy::expect_used)]
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$(?:(?P<escaped>\$)|(?P<named>[_A-Za-z][_A-Za-z0-9]*)|\{(?P<braced>[_A-Za-z][_A-Za-z0-9-]*)\}|(?P<invalid>))",
    )
    .expect("valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed string template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template, rejecting malformed `$` sequences.
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in PLACEHOLDER_RE.captures_iter(source) {
            let Some(whole) = caps.get(0) else { continue };
            literal.push_str(&source[last..whole.start()]);
            last = whole.end();

            if caps.name("escaped").is_some() {
                literal.push('$');
                continue;
            }

            let name = caps.name("named").or_else(|| caps.name("braced"));
            match name {
                Some(name) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name.as_str().to_string()));
                }
                None => {
                    return Err(Error::template(
                        source,
                        format!("invalid placeholder at offset {}", whole.start()),
                    ));
                }
            }
        }

        literal.push_str(&source[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The unparsed template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholder names in order of appearance (may repeat).
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the template references `name`.
    pub fn references(&self, name: &str) -> bool {
        self.placeholders().any(|p| p == name)
    }

    /// Substitute every placeholder; a missing value is an error.
    pub fn substitute(&self, values: &HashMap<&str, String>) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match values.get(name.as_str()) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(Error::template(
                            &self.source,
                            format!("no value for placeholder \"{name}\""),
                        ));
                    }
                },
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
