//! # cardsim CLI Library
//!
//! Command-line front end for the `cardsim-engine` Monte Carlo estimator.
//! The [`run`] function parses arguments and dispatches to a subcommand,
//! writing to the streams it is given so tests can capture everything.
//!
//! ## Example Usage
//!
//! ```
//! let args = vec!["cardsim", "run", "--builtin-52", "--event", "1", "--iterations", "100"];
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = cardsim_cli::run(args, &mut out, &mut err);
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `run`: Estimate an event probability from a setup file or explicit inputs
//! - `events`: List built-in events
//! - `rng`: Print generator samples for a seed pair
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
pub mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod loader;
pub mod logging;
#[macro_use]
mod macros;
pub mod ui;

use cli::{CardsimCli, Commands};
use commands::{handle_cfg_command, handle_events_command, handle_rng_command, handle_run_command};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Returns the process exit code: [`exit_code::SUCCESS`] or
/// [`exit_code::ERROR`]. Errors are written to `err` as `Error: ...`.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["run", "events", "rng", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    logging::init();

    let cli = match CardsimCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Usage: cardsim <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: cardsim --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Run(args) => handle_run_command(args, out, err),
        Commands::Events => handle_events_command(out),
        Commands::Rng {
            seed1,
            seed2,
            count,
        } => handle_rng_command(seed1, seed2, count, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if ui::write_error(err, &e.to_string()).is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}
