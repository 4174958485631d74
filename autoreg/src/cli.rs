//! This file defines the command-line interface (CLI) for the autoreg
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use autoreg_core::DEFAULT_PROPERTIES_PATH;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "autoreg",
    version = env!("CARGO_PKG_VERSION"),
    about = "Inspect and scrub build-agent auto-registration properties",
    long_about = "autoreg reads the auto-registration settings (registration key, resources, environments, hostname) from a build agent's properties file, and comments them out once the agent has attempted to register.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to the auto-registration properties file.
    #[arg(
        long = "file",
        short = 'f',
        value_name = "FILE",
        env = "AUTOREG_PROPERTIES_FILE",
        default_value = DEFAULT_PROPERTIES_PATH,
        global = true,
        help = "Path to the auto-registration properties file."
    )]
    pub file: PathBuf,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `autoreg` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prints the auto-registration settings found in the file.
    #[command(about = "Prints the auto-registration settings found in the file.")]
    Show(ShowCommand),

    /// Comments out the auto-registration settings in the file.
    #[command(about = "Comments out the auto-registration settings in the file.")]
    Scrub(ScrubCommand),
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowCommand {
    /// Print the settings as JSON.
    #[arg(long = "json", help = "Print the settings as JSON.")]
    pub json: bool,

    /// Print the registration key instead of masking it.
    #[arg(long = "reveal-key", help = "Print the registration key instead of masking it.")]
    pub reveal_key: bool,
}

/// Arguments for the `scrub` command.
#[derive(Parser, Debug)]
pub struct ScrubCommand {
    /// Print the scrubbed contents instead of rewriting the file.
    #[arg(long = "dry-run", help = "Print the scrubbed contents to stdout without modifying the file.")]
    pub dry_run: bool,
}
