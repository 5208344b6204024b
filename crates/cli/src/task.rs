// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Executable checker tasks.
//!
//! A task owns a fully rendered argv, its merged configuration, and the
//! function that turns the process exit code and output into a
//! [`CheckResult`]. Running a task spawns one child process with stdout and
//! stderr merged into a single pipe.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use indexmap::IndexMap;

use crate::check::CheckResult;
use crate::config::CheckerConfig;
use crate::error::{Error, Result};
use crate::template::Template;

/// Placeholder that receives all per-option command fragments.
pub const OPTIONS_PLACEHOLDER: &str = "options";

/// Placeholder available inside command-option templates.
pub const VALUE_PLACEHOLDER: &str = "value";

/// Converts `(task, exit code, merged output)` into a result.
pub type ResultCreator = fn(&Task, i32, &str) -> CheckResult;

/// Default result creator: exit code 0 is success, anything else is an error
/// carrying the captured output.
pub fn create_result_by_returncode(task: &Task, returncode: i32, output: &str) -> CheckResult {
    if returncode == 0 {
        CheckResult::success(task.name())
    } else {
        CheckResult::error(task.name(), output)
    }
}

/// One concrete, executable unit of work.
#[derive(Clone)]
pub struct Task {
    name: String,
    argv: Vec<String>,
    command: String,
    config: CheckerConfig,
    create_result: ResultCreator,
    current_dir: Option<PathBuf>,
}

impl Task {
    /// Create a task from an already rendered argv.
    pub fn new(
        name: impl Into<String>,
        argv: Vec<String>,
        config: CheckerConfig,
        create_result: ResultCreator,
    ) -> Result<Self> {
        if argv.is_empty() {
            return Err(Error::template("", "command is empty"));
        }
        let command = shell_words::join(&argv);
        Ok(Self {
            name: name.into(),
            argv,
            command,
            config,
            create_result,
            current_dir: None,
        })
    }

    /// Create a task from a plain shell-quoted command line.
    pub fn from_command(name: impl Into<String>, command: &str) -> Result<Self> {
        let argv = split_command(command, command)?;
        let name = name.into();
        let config = CheckerConfig::new(name.clone(), IndexMap::new());
        Self::new(name, argv, config, create_result_by_returncode)
    }

    /// Replace the result creator.
    pub fn with_result_creator(mut self, create_result: ResultCreator) -> Self {
        self.create_result = create_result;
        self
    }

    /// Run the child process in `dir` instead of the current directory.
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical shell-quoted command line.
    pub fn command(&self) -> &str {
        &self.command
    }

    #[cfg(test)]
    pub(crate) fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Execute the command and interpret its outcome.
    ///
    /// Launch failures (e.g. executable not found) become an ERROR result
    /// with the OS error text as message. Safe to call repeatedly; each call
    /// spawns a new process.
    pub fn run(&self) -> CheckResult {
        tracing::debug!("running {}: {}", self.name, self.command);
        match self.execute() {
            Ok((returncode, output)) => {
                tracing::trace!("{} exited with {}", self.name, returncode);
                (self.create_result)(self, returncode, &output)
            }
            Err(e) => {
                tracing::debug!("{} failed to start: {}", self.name, e);
                CheckResult::error(
                    &self.name,
                    format!("failed to execute {}: {e}", self.argv[0]),
                )
            }
        }
    }

    fn execute(&self) -> io::Result<(i32, String)> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;

        let (mut reader, writer) = io::pipe()?;
        // The Command holds write ends of the pipe; it must be dropped before
        // reading or read_to_end never sees EOF.
        let mut child = {
            let mut command = Command::new(program);
            command
                .args(args)
                .stdin(Stdio::null())
                .stdout(writer.try_clone()?)
                .stderr(writer);
            if let Some(dir) = &self.current_dir {
                command.current_dir(dir);
            }
            command.spawn()?
        };

        let mut buf = Vec::new();
        let read = reader.read_to_end(&mut buf);
        let status = child.wait()?;
        read?;

        Ok((exit_code(status), String::from_utf8_lossy(&buf).into_owned()))
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("command", &self.command)
            .field("config", &self.config)
            .field("current_dir", &self.current_dir)
            .finish_non_exhaustive()
    }
}

/// Map an exit status to an integer; signals map to their negated number.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}

/// Render a command template into an argv.
///
/// For each option, in declaration order, with a non-null value:
/// - the value is shell-quoted and, if the option has a command-option
///   template, rendered through it (`--rcfile=${value}`)
/// - if the command references the option by name, the fragment goes there
///   (a null value renders as the empty string)
/// - otherwise options with a command-option template are joined with a
///   single space into `${options}`
///
/// `params` supplies the remaining placeholders (file paths); their values are
/// shell-quoted too. The result is tokenized with shell quoting rules, so a
/// quoted value always stays a single argument.
pub fn build_command(
    template: &Template,
    command_options: &IndexMap<String, Template>,
    config: &CheckerConfig,
    params: &[(&'static str, &str)],
) -> Result<Vec<String>> {
    let mut values: HashMap<&str, String> = params
        .iter()
        .map(|(name, value)| (*name, shell_words::quote(value).into_owned()))
        .collect();
    let mut fragments = Vec::new();

    for (option, _) in config.iter() {
        let direct = template.references(option);
        let option_template = command_options.get(option);
        if !direct && option_template.is_none() {
            continue;
        }

        let rendered = match config.render(option)? {
            None => None,
            Some(raw) => {
                let quoted = shell_words::quote(&raw).into_owned();
                Some(match option_template {
                    Some(t) => t.substitute(&HashMap::from([(VALUE_PLACEHOLDER, quoted)]))?,
                    None => quoted,
                })
            }
        };

        if direct {
            values.insert(option, rendered.unwrap_or_default());
        } else {
            fragments.extend(rendered);
        }
    }

    if template.references(OPTIONS_PLACEHOLDER) {
        values.insert(OPTIONS_PLACEHOLDER, fragments.join(" "));
    }

    let rendered = template.substitute(&values)?;
    split_command(&rendered, template.source())
}

fn split_command(command: &str, source: &str) -> Result<Vec<String>> {
    let argv = shell_words::split(command)
        .map_err(|e| Error::template(source, format!("cannot split command: {e}")))?;
    if argv.is_empty() {
        return Err(Error::template(source, "command is empty"));
    }
    Ok(argv)
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
