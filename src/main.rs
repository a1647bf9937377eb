//! `dpm` binary entry point.
use anyhow::Result;
use clap::Parser as _;

use dpm::cli::Cli;
use dpm::commands;
use dpm::logging::Logger;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let log = Logger::new(args.verbose);

    commands::run(&args, &log)?;
    Ok(())
}
