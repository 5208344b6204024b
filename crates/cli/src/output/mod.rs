// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for check results.

pub mod json;
pub mod text;

pub use json::{JsonFormatter, create_output};
pub use text::TextFormatter;

/// Width of the rule printed before the verdict.
pub const SEPARATOR_WIDTH: usize = 40;

/// Verdict line for a finished batch.
pub fn verdict(passed: bool) -> &'static str {
    if passed { "OK" } else { "Commit aborted" }
}
