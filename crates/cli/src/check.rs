// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check result types for output formatting.

use std::fmt;

use serde::Serialize;

/// Outcome class of a single checker invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Success,
    /// Reported but never fails the batch.
    Warning,
    Error,
}

impl Status {
    /// Human-readable label used by the text formatter.
    pub fn label(self) -> &'static str {
        match self {
            Status::Success => "OK",
            Status::Warning => "WARNING",
            Status::Error => "FAILED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of running a single checker task.
///
/// `summary` and `message` distinguish "unset" (`None`) from an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Task identifier, usually containing the checked file.
    pub task_name: String,

    pub status: Status,

    /// Short one-line description (e.g. `Code Rate 8.50/10`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Long description, typically the raw tool output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a result with explicit fields.
    pub fn new(
        task_name: impl Into<String>,
        status: Status,
        summary: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            task_name: task_name.into(),
            status,
            summary,
            message,
        }
    }

    /// Create a successful result with no summary or message.
    pub fn success(task_name: impl Into<String>) -> Self {
        Self::new(task_name, Status::Success, None, None)
    }

    /// Create an error result carrying tool output as the message.
    pub fn error(task_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(task_name, Status::Error, None, Some(message.into()))
    }

    /// Create a warning result with a summary.
    pub fn warning(task_name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self::new(task_name, Status::Warning, Some(summary.into()), None)
    }

    /// Set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }
}

/// Aggregated results from one pre-commit run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    /// ISO 8601 timestamp.
    pub timestamp: String,

    /// Whether no result has ERROR status.
    pub passed: bool,

    /// Results in task submission order.
    pub results: Vec<CheckResult>,
}

impl CheckOutput {
    /// Create output from collected results.
    pub fn new(timestamp: String, results: Vec<CheckResult>) -> Self {
        // Warnings never fail the batch
        let passed = results.iter().all(|r| !r.is_error());
        Self {
            timestamp,
            passed,
            results,
        }
    }

    /// Process exit status for this run: 0 if passed, 1 otherwise.
    pub fn exit_code(&self) -> crate::error::ExitCode {
        if self.passed {
            crate::error::ExitCode::Success
        } else {
            crate::error::ExitCode::CheckFailed
        }
    }

    /// Count results with the given status.
    pub fn count(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
