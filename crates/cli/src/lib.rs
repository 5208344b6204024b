// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configurable pre-commit check runner.
//!
//! Configuration names checkers per file pattern. The builder expands it into
//! shell tasks for the staged files, and the runner executes them in parallel
//! and turns their output into results.

pub mod builder;
pub mod check;
pub mod checkers;
pub mod cli;
pub mod cmd_init;
pub mod color;
pub mod completions;
pub mod config;
pub mod discovery;
pub mod error;
pub mod git;
pub mod init;
pub mod output;
pub mod patterns;
pub mod runner;
pub mod task;
pub mod template;

pub use builder::{CheckListBuilder, build_tasks};
pub use check::{CheckOutput, CheckResult, Status};
pub use checkers::{CheckerKind, CheckerSpec, Registry};
pub use cli::{CheckArgs, Cli, Command, InitArgs, OutputFormat};
pub use config::{CheckerConfig, ChecksConfig};
pub use error::{Error, ExitCode, Result};
pub use git::{GitRepo, Vcs};
pub use runner::{CheckRunner, RunnerConfig, execute_checkers};
pub use task::Task;
