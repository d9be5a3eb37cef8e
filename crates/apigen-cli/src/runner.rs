//! Command execution and runtime logic.
//!
//! Contains logging initialization, command dispatch and the mapping from
//! failures to process exit codes.

use anyhow::Result;
use apigen_core::cli::{ExitCode, OutputFormat};
use clap::CommandFactory;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::commands;

/// Initializes logging infrastructure.
///
/// Logs go to stderr so that stdout carries only the command result.
/// `RUST_LOG` is honoured unless `verbose` forces the debug level.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Executes the specified CLI command.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn execute_command(command: Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Generate(args) => commands::generate::run(&args, output_format),
        Commands::Profiles { show } => commands::profiles::run(show.as_deref(), output_format),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}

/// Exit code for a failed command.
///
/// Invalid operator input exits with [`ExitCode::INVALID_INPUT`]; model
/// errors and I/O failures exit with [`ExitCode::ERROR`].
#[must_use]
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<apigen_core::Error>())
        .map_or(ExitCode::ERROR, ExitCode::for_error)
}
