//! branchsync: create a local tracking branch for every branch on a git remote.
//!
//! This is the main entry point for the `branchsync` CLI. It parses
//! arguments, sets up logging, runs the sync, and maps errors to exit codes.

mod branches;
mod cli;
mod config;
mod error;
mod exit_codes;
mod git;
mod logging;
mod report;
mod sync;

#[cfg(test)]
mod test_support;

use cli::Cli;
use config::{OutputFormat, SyncConfig};
use error::Result;
use std::process::ExitCode;

fn run(cli: &Cli) -> Result<()> {
    let config = SyncConfig::from_cli(cli)?;
    let text = config.output == OutputFormat::Text;

    let report = sync::sync_repository(&config, text)?;

    if text {
        print!("{}", report.render_text());
    } else {
        println!("{}", report.render_json()?);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
