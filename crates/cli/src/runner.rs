// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel task runner with error isolation.
//!
//! Runs tasks on a fixed-size rayon pool. Every task runs to completion even
//! when an earlier one failed, and a panicking result creator becomes an
//! ERROR result instead of taking down the batch.
//!
//! There is no timeout: a tool that never exits blocks the run.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread;

use crate::check::{CheckResult, Status};
use crate::error::{Error, Result};
use crate::task::Task;

/// Configuration for the task runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Worker threads (each runs one subprocess at a time).
    pub jobs: usize,
}

impl RunnerConfig {
    pub fn with_jobs(jobs: usize) -> Self {
        Self { jobs: jobs.max(1) }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        let jobs = thread::available_parallelism().map_or(1, usize::from);
        Self { jobs }
    }
}

/// The check runner executes tasks in parallel.
pub struct CheckRunner {
    config: RunnerConfig,
}

impl CheckRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Run all tasks and return their results in submission order.
    pub fn run(&self, tasks: &[Task]) -> Result<Vec<CheckResult>> {
        self.run_streaming(tasks, |_| {})
    }

    /// Run all tasks, reporting each result as soon as it and every earlier
    /// task have completed.
    ///
    /// `on_result` sees results in submission order. Completion order is
    /// unspecified.
    pub fn run_streaming<F>(&self, tasks: &[Task], mut on_result: F) -> Result<Vec<CheckResult>>
    where
        F: FnMut(&CheckResult),
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
            .map_err(|e| Error::Internal(format!("cannot start worker pool: {e}")))?;

        tracing::debug!(
            "running {} tasks on {} workers",
            tasks.len(),
            self.config.jobs
        );

        let mut slots: Vec<Option<CheckResult>> = vec![None; tasks.len()];
        let mut next = 0;

        // Collect on the calling thread; pool workers only run tasks.
        pool.in_place_scope(|scope| {
            let (tx, rx) = crossbeam_channel::unbounded();
            for (index, task) in tasks.iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let result = run_task(task);
                    // Receiver outlives every worker
                    let _ = tx.send((index, result));
                });
            }
            drop(tx);

            for (index, result) in rx {
                tracing::debug!("{}: {}", result.task_name, result.status.label());
                slots[index] = Some(result);
                while let Some(Some(ready)) = slots.get(next) {
                    on_result(ready);
                    next += 1;
                }
            }
        });

        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::Internal("task finished without a result".to_string()))
    }
}

/// Run one task, converting a panic into an ERROR result.
fn run_task(task: &Task) -> CheckResult {
    catch_unwind(AssertUnwindSafe(|| task.run())).unwrap_or_else(|_| {
        tracing::warn!("result creator for {} panicked", task.name());
        CheckResult::error(task.name(), "internal error: result creator panicked")
    })
}

/// Exit status for a batch: 0 unless some result is an ERROR.
///
/// WARNING results never fail the batch.
pub fn exit_status(results: &[CheckResult]) -> i32 {
    if results.iter().any(|r| r.status == Status::Error) {
        1
    } else {
        0
    }
}

/// Run every task with the default worker count and return the exit status.
pub fn execute_checkers(tasks: &[Task]) -> Result<i32> {
    let results = CheckRunner::new(RunnerConfig::default()).run(tasks)?;
    Ok(exit_status(&results))
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
