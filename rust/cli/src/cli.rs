//! Command-line surface, parsed with clap derive.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cardsim",
    version,
    about = "Estimate deck event probabilities by parallel Monte Carlo simulation"
)]
pub struct CardsimCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a simulation from a setup file or explicit inputs
    Run(RunArgs),
    /// List the built-in events
    Events,
    /// Print samples from the multiply-with-carry generator
    Rng {
        #[arg(long, default_value_t = 0)]
        seed1: u32,
        #[arg(long, default_value_t = 0)]
        seed2: u32,
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Setup file: `event file_count thread_count catalog deck...`
    pub setup: Option<PathBuf>,
    /// Event selector (1-4), see `cardsim events`
    #[arg(long)]
    pub event: Option<u32>,
    /// Catalog file; replaces the one named in the setup file
    #[arg(long, conflicts_with = "builtin_52")]
    pub catalog: Option<PathBuf>,
    /// Deck file, repeatable; replaces the decks named in the setup file
    #[arg(long = "deck")]
    pub decks: Vec<PathBuf>,
    /// Use the standard 52-card catalog and one full deck
    #[arg(long = "builtin-52")]
    pub builtin_52: bool,
    #[arg(long)]
    pub threads: Option<usize>,
    /// Total trials, split across threads
    #[arg(long)]
    pub iterations: Option<u64>,
    /// Base seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
    /// Cancel the run after this many seconds and report what finished
    #[arg(long = "timeout-secs")]
    pub timeout_secs: Option<u64>,
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
    /// Also write the JSON report to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
}
