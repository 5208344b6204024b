// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::checkers::CheckerKind;

/// Codechecker error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Checker name not present in the registry
    #[error("invalid checker name \"{name}\" ({kind})")]
    InvalidChecker { name: String, kind: CheckerKind },

    /// Option not declared in the checker's default configuration
    #[error("\"{option}\" is not a valid option for {checker}")]
    InvalidConfigOption { checker: String, option: String },

    /// Option value that cannot be rendered into a command
    #[error("invalid value for option \"{option}\" of {checker}: {reason}")]
    InvalidOptionValue {
        checker: String,
        option: String,
        reason: String,
    },

    /// Command or task name template cannot be rendered
    #[error("template error in {template:?}: {reason}")]
    Template { template: String, reason: String },

    /// Repository discovery or index access failed
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub(crate) fn template(template: &str, reason: impl Into<String>) -> Self {
        Error::Template {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type using codechecker Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Every checker finished without an ERROR result
    Success = 0,
    /// At least one checker reported ERROR
    CheckFailed = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. }
            | Error::InvalidChecker { .. }
            | Error::InvalidConfigOption { .. }
            | Error::InvalidOptionValue { .. }
            | Error::Template { .. } => ExitCode::ConfigError,
            Error::Git(_) | Error::Io { .. } | Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
