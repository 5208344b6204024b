// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed).

use std::io::Write;

use chrono::{SecondsFormat, Utc};

use crate::check::{CheckOutput, CheckResult};

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the full output as pretty-printed JSON.
    pub fn write(&mut self, output: &CheckOutput) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, output)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Wrap results with the current RFC 3339 timestamp.
pub fn create_output(results: Vec<CheckResult>) -> CheckOutput {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    CheckOutput::new(timestamp, results)
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
