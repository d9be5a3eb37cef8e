//! apigen command-line entry point.
//!
//! # Examples
//!
//! ```bash
//! # Objective-C headers and XCTest round-trip tests
//! apigen generate --model api.json --profile objc --output build/objc
//!
//! # JavaScript routes module, JSON summary on stdout
//! apigen --format json generate -m api.json -p javascript -o build/js
//!
//! # Start a custom profile from a built-in one
//! apigen profiles --show objc > acme.toml
//! ```

use anyhow::Result;
use apigen_cli::cli::Cli;
use apigen_cli::runner::{execute_command, exit_code_for, init_logging};
use apigen_core::cli::{ExitCode, OutputFormat};
use clap::Parser;
use colored::Colorize;

fn run(cli: Cli) -> Result<ExitCode> {
    let output_format = cli.format.parse::<OutputFormat>()?;
    execute_command(cli.command, output_format)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            exit_code_for(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}
