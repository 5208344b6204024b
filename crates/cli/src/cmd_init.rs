// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Implementation of the `codechecker init` command.

use std::path::Path;

use anyhow::Result;

use crate::cli::InitArgs;
use crate::error::ExitCode;
use crate::init::{FileAction, init_repository};

/// Run the `init` command to install the hook and a starter config.
pub fn run(args: &InitArgs) -> Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let report = init_repository(&cwd, args.force)?;

    report_file(&report.hook_path, report.hook);
    report_file(&report.config_path, report.config);
    Ok(ExitCode::Success)
}

fn report_file(path: &Path, action: FileAction) {
    match action {
        FileAction::Created => println!("Created {}", path.display()),
        FileAction::Overwritten => println!("Overwrote {}", path.display()),
        FileAction::Kept => println!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        ),
    }
}
