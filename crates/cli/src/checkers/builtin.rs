// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in checker definitions.

use serde_yaml::Value;

use super::result_creators::{
    create_phpunit_result, create_pylint_result, create_pyunittest_result,
};
use super::{CheckerSpec, Registry};
use crate::error::Result;

/// Register every built-in checker.
pub fn register(registry: &mut Registry) -> Result<()> {
    // Project checkers
    registry.register(
        CheckerSpec::project(
            "unittest",
            "python unittest",
            "${executable} -m unittest discover ${directory}",
        )?
        .with_option("executable", "python")
        .with_option("directory", ".")
        .with_result_creator(create_pyunittest_result),
    )?;

    registry.register(
        CheckerSpec::project("phpunit", "PHPUnit", "${executable} ${bootstrap} ${directory}")?
            .with_option("executable", "phpunit")
            .with_option("bootstrap", Value::Null)
            .with_option("directory", Value::Null)
            .with_command_option("bootstrap", "--bootstrap ${value}")?
            .with_command_option("directory", "${value}")?
            .with_result_creator(create_phpunit_result),
    )?;

    // File checkers
    registry.register(
        CheckerSpec::file(
            "pep8",
            "PEP8 ${file_relpath}",
            "${executable} ${options} ${file_abspath}",
        )?
        .with_option("executable", "pep8")
        .with_option("max-line-length", Value::Null)
        .with_command_option("max-line-length", "--max-line-length=${value}")?,
    )?;

    registry.register(
        CheckerSpec::file("pep257", "PEP257 ${file_relpath}", "${executable} ${file_abspath}")?
            .with_option("executable", "pep257"),
    )?;

    registry.register(
        CheckerSpec::file(
            "jshint",
            "JSHint ${file_relpath}",
            "${executable} ${options} ${file_abspath}",
        )?
        .with_option("executable", "jshint")
        .with_option("config", ".jshintrc")
        .with_command_option("config", "--config ${value}")?,
    )?;

    registry.register(
        CheckerSpec::file(
            "pylint",
            "Pylint ${file_relpath}",
            "${executable} -f parseable ${file_abspath} ${options}",
        )?
        .with_option("executable", "pylint")
        .with_option("rcfile", Value::Null)
        .with_numeric_option("accepted-code-rate", 9)
        .with_command_option("rcfile", "--rcfile=${value}")?
        .with_result_creator(create_pylint_result),
    )?;

    Ok(())
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod tests;
