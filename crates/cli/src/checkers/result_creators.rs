// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result creators that read tool-specific output.
//!
//! Each creator has the [`ResultCreator`](crate::task::ResultCreator)
//! signature and never fails: output it cannot interpret degrades to a
//! WARNING or ERROR result.

use std::sync::LazyLock;

use regex::Regex;

use crate::check::{CheckResult, Status};
use crate::task::Task;

/// Option read by [`create_pylint_result`].
pub const ACCEPTED_CODE_RATE: &str = "accepted-code-rate";

#[allow(clippy::expect_used)]
static CODE_RATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Your code has been rated at (-?[\d.]+)/10").expect("valid regex")
});

#[allow(clippy::expect_used)]
static PYLINT_MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([a-zA-Z1-9_/]+\.py:\d+:.+?)\r?$").expect("valid regex")
});

#[allow(clippy::expect_used)]
static UNITTEST_SKIPPED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"OK \(skipped=\d+\)").expect("valid regex"));

#[allow(clippy::expect_used)]
static UNITTEST_FAILED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"FAILED \((?:failures=\d+)?(?:, )?(?:errors=\d+)?(?:, )?(?:skipped=\d+)?\)")
        .expect("valid regex")
});

#[allow(clippy::expect_used)]
static UNITTEST_RAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Ran \d+ tests? in [0-9.]+s").expect("valid regex"));

#[allow(clippy::expect_used)]
static PHPUNIT_RESULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(OK \(.*\)|OK, but .*?|Tests: .*?)\r?$").expect("valid regex")
});

#[allow(clippy::expect_used)]
static PHPUNIT_RESOURCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(Time: .*?)\r?$").expect("valid regex"));

/// Interpret pylint's parseable output.
///
/// A rate of 10 passes; a rate at or above `accepted-code-rate` warns; a lower
/// rate fails. Message lines (`file.py:N: ...`) become the result message.
pub fn create_pylint_result(task: &Task, _returncode: i32, output: &str) -> CheckResult {
    let accepted = match task.config().get_f64(ACCEPTED_CODE_RATE) {
        Ok(rate) => rate,
        Err(e) => return CheckResult::error(task.name(), e.to_string()),
    };

    let messages: Vec<&str> = PYLINT_MESSAGE_RE
        .captures_iter(output)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();
    let message = (!messages.is_empty()).then(|| messages.join("\n"));

    let rate = CODE_RATE_RE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok());

    let Some(rate) = rate else {
        return CheckResult::new(
            task.name(),
            Status::Warning,
            Some("Code Rate UNKNOWN".to_string()),
            message,
        );
    };

    if rate >= 10.0 {
        return CheckResult::success(task.name());
    }

    let (status, summary) = if rate >= accepted {
        (Status::Warning, format!("Code Rate {rate:.2}/10"))
    } else {
        (Status::Error, format!("Failed: Code Rate {rate:.2}/10"))
    };
    CheckResult::new(task.name(), status, Some(summary), message)
}

/// Interpret `python -m unittest` output.
///
/// Skipped tests turn an otherwise passing run into a WARNING.
pub fn create_pyunittest_result(task: &Task, returncode: i32, output: &str) -> CheckResult {
    let ran = UNITTEST_RAN_RE.find(output).map(|m| m.as_str());
    let with_ran = |summary: &str| match ran {
        Some(ran) => format!("{ran} - {summary}"),
        None => summary.to_string(),
    };

    if returncode != 0 {
        let failed = UNITTEST_FAILED_RE
            .find(output)
            .map_or("Errors", |m| m.as_str());
        return CheckResult::error(task.name(), output).with_summary(with_ran(failed));
    }

    if let Some(skipped) = UNITTEST_SKIPPED_RE.find(output) {
        return CheckResult::warning(task.name(), with_ran(skipped.as_str()));
    }

    CheckResult::new(
        task.name(),
        Status::Success,
        ran.map(str::to_string),
        None,
    )
}

/// Interpret PHPUnit output.
///
/// The summary joins the result line (`OK (...)`, `OK, but ...`, `Tests: ...`)
/// and the resource line (`Time: ..., Memory: ...`).
pub fn create_phpunit_result(task: &Task, returncode: i32, output: &str) -> CheckResult {
    let result_line = PHPUNIT_RESULT_RE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());
    let resource_line = PHPUNIT_RESOURCE_RE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    let summary = result_line.map(|result| match resource_line {
        Some(resource) => format!("{result} - {resource}"),
        None => result.to_string(),
    });

    if returncode != 0 {
        return CheckResult::error(task.name(), output)
            .with_summary(summary.unwrap_or_else(|| "FAILED".to_string()));
    }

    let status = match result_line {
        Some(line) if line.starts_with("OK, but") => Status::Warning,
        _ => Status::Success,
    };
    CheckResult::new(task.name(), status, summary, None)
}

#[cfg(test)]
#[path = "result_creators_tests.rs"]
mod tests;
