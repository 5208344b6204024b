// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.

use codechecker::builder::build_tasks;
use codechecker::check::{CheckOutput, CheckResult, Status};
use codechecker::checkers::Registry;
use codechecker::cli::{CheckArgs, Cli, OutputFormat};
use codechecker::color::resolve_color;
use codechecker::config;
use codechecker::discovery;
use codechecker::error::ExitCode;
use codechecker::git::GitRepo;
use codechecker::output::json::{self, JsonFormatter};
use codechecker::output::text::TextFormatter;
use codechecker::runner::{CheckRunner, RunnerConfig};

/// Run the check command.
pub fn run(cli: &Cli, args: &CheckArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;

    let Some(config_path) = discovery::resolve_config(cli.config.as_deref(), &cwd)? else {
        tracing::debug!("no {} found, nothing to check", discovery::CONFIG_FILE_NAME);
        return finish(args, Vec::new());
    };

    let config = config::load(&config_path)?;
    let repo = GitRepo::discover(&cwd)?;
    let registry = Registry::builtin()?;
    let tasks = build_tasks(&config, &registry, &repo)?;

    let runner_config = match args.jobs {
        Some(jobs) => RunnerConfig::with_jobs(jobs),
        None => RunnerConfig::default(),
    };
    let runner = CheckRunner::new(runner_config);

    match args.output {
        OutputFormat::Text => {
            let mut formatter = TextFormatter::new(resolve_color(args.color_flag()));
            let mut write_error = None;
            let results = runner.run_streaming(&tasks, |result| {
                if write_error.is_none()
                    && let Err(e) = formatter.write_result(result)
                {
                    write_error = Some(e);
                }
            })?;
            if let Some(e) = write_error {
                return Err(e.into());
            }
            let output = json::create_output(results);
            log_counts(&output);
            formatter.write_footer(output.passed)?;
            Ok(output.exit_code())
        }
        OutputFormat::Json => {
            let results = runner.run(&tasks)?;
            finish(args, results)
        }
    }
}

/// Report a batch that needed no streaming.
fn finish(args: &CheckArgs, results: Vec<CheckResult>) -> anyhow::Result<ExitCode> {
    let output = json::create_output(results);
    log_counts(&output);
    match args.output {
        OutputFormat::Text => {
            let mut formatter = TextFormatter::new(resolve_color(args.color_flag()));
            for result in &output.results {
                formatter.write_result(result)?;
            }
            formatter.write_footer(output.passed)?;
        }
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            JsonFormatter::new(stdout.lock()).write(&output)?;
        }
    }
    Ok(output.exit_code())
}

fn log_counts(output: &CheckOutput) {
    tracing::debug!(
        "{} ok, {} warnings, {} failed",
        output.count(Status::Success),
        output.count(Status::Warning),
        output.count(Status::Error)
    );
}
