// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! Pylint module.py: WARNING (Code Rate 8.50/10)
//!   module.py:3: [C0111] Missing docstring
//! PEP8 module.py: OK
//! ----------------------------------------
//! OK
//! ```

use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

use super::{SEPARATOR_WIDTH, verdict};
use crate::check::{CheckResult, Status};
use crate::color::scheme;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor = StandardStream> {
    out: W,
}

impl TextFormatter<StandardStream> {
    /// Create a formatter writing to stdout.
    pub fn new(color_choice: ColorChoice) -> Self {
        Self::with_writer(StandardStream::stdout(color_choice))
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    /// Write a single result (streaming).
    pub fn write_result(&mut self, result: &CheckResult) -> std::io::Result<()> {
        self.colored(&scheme::task_name(), &result.task_name)?;
        write!(self.out, ": ")?;

        let spec = match result.status {
            Status::Success => scheme::pass(),
            Status::Warning => scheme::warn(),
            Status::Error => scheme::fail(),
        };
        self.colored(&spec, result.status.label())?;

        if let Some(summary) = &result.summary {
            write!(self.out, " ({summary})")?;
        }
        writeln!(self.out)?;

        // Tool output is noise on success
        if result.status != Status::Success
            && let Some(message) = &result.message
        {
            self.write_message(message)?;
        }
        Ok(())
    }

    fn write_message(&mut self, message: &str) -> std::io::Result<()> {
        self.out.set_color(&scheme::message())?;
        for line in message.lines() {
            if line.trim().is_empty() {
                writeln!(self.out)?;
            } else {
                writeln!(self.out, "  {line}")?;
            }
        }
        self.out.reset()
    }

    /// Write the separator and the batch verdict.
    pub fn write_footer(&mut self, passed: bool) -> std::io::Result<()> {
        writeln!(self.out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        let spec = if passed { scheme::pass() } else { scheme::fail() };
        self.colored(&spec, verdict(passed))?;
        writeln!(self.out)?;
        self.out.flush()
    }

    fn colored(&mut self, spec: &ColorSpec, text: &str) -> std::io::Result<()> {
        self.out.set_color(spec)?;
        write!(self.out, "{text}")?;
        self.out.reset()
    }

    /// Consume the formatter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
