// autoreg/src/main.rs
//! autoreg entry point.

use anyhow::Result;
use clap::Parser;
use log::debug;
use std::io;

use autoreg::cli::{Cli, Commands};
use autoreg::commands::{scrub::run_scrub, show::run_show};
use autoreg::logger;
use autoreg_core::AutoRegistrationPropertiesReader;

fn main() -> Result<()> {
    let args = Cli::parse();
    logger::init_logger(logger::level_from_flags(args.quiet, args.debug));
    debug!("Parsed arguments: {:?}", args);

    let reader = AutoRegistrationPropertiesReader::new(&args.file);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.command {
        Commands::Show(opts) => run_show(&reader, opts, &mut out),
        Commands::Scrub(opts) => run_scrub(&reader, opts, &mut out),
    }
}
