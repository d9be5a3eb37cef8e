//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// apigen - SDK code generation from a validated API model.
///
/// Emits data type declarations, serializers, route bindings and
/// round-trip serialization tests for one target profile per run.
#[derive(Parser, Debug)]
#[command(name = "apigen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate declarations and round-trip tests for one profile.
    ///
    /// Every input is loaded and validated before generation starts, and
    /// nothing is written unless generation succeeds.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Objective-C headers and XCTest cases
    /// apigen generate --model api.json --profile objc --output out/objc
    ///
    /// # JavaScript routes module with a documented class and extra argument
    /// apigen generate --model api.json --profile javascript --output out/js \
    ///     --filename base.js --class-name Dropbox \
    ///     --extra-arg '{"match": ["auth", "user"], "arg_name": "select_user", "arg_type": "String"}'
    /// ```
    Generate(GenerateArgs),

    /// List the built-in type profiles, or print one as TOML.
    ///
    /// # Examples
    ///
    /// ```bash
    /// apigen profiles
    /// apigen profiles --show objc > my-profile.toml
    /// ```
    Profiles {
        /// Print the TOML source of this built-in profile
        #[arg(long)]
        show: Option<String>,
    },

    /// Generate shell completions.
    ///
    /// Generates completion scripts for various shells that can be
    /// sourced or saved to enable tab completion for this CLI.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments of the `generate` command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    /// API model JSON produced by the upstream parser
    #[arg(short, long)]
    pub model: PathBuf,

    /// Built-in profile name or path to a profile TOML file
    #[arg(short, long)]
    pub profile: String,

    /// Directory the artifacts are written to (created if missing)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Name of the JavaScript routes module (default: routes.js)
    #[arg(long)]
    pub filename: Option<String>,

    /// Class the JavaScript route functions are documented on
    #[arg(long)]
    pub class_name: Option<String>,

    /// Extra route argument rule as a JSON object (repeatable)
    ///
    /// Shape: {"match": ["ATTR", "VALUE"], "arg_name": "...", "arg_type": "...", "arg_docstring": "..."}
    #[arg(long = "extra-arg", num_args = 1)]
    pub extra_args: Vec<String>,

    /// File holding a JSON array of extra route argument rules
    #[arg(long)]
    pub extra_args_file: Option<PathBuf>,

    /// Skip declaration artifacts
    #[arg(long)]
    pub no_declarations: bool,

    /// Skip round-trip test artifacts
    #[arg(long)]
    pub no_tests: bool,
}
