//! Silvera: a static site builder.
//!
//! This is the main entry point for the `silvera` CLI. It parses arguments,
//! installs logging, dispatches to the appropriate command handler, and maps
//! errors to exit codes.

mod build;
mod cli;
mod commands;
mod config;
mod context;
mod error;
mod exit_codes;
mod fs;
mod hooks;
mod logging;
mod render;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init_tracing();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
