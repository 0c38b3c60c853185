//! Command handler modules for the cardsim CLI.
//!
//! Each subcommand lives in its own file and exposes one
//! `handle_COMMAND_command(...) -> Result<(), CliError>` function that takes
//! its output streams as `&mut dyn Write`.

mod cfg;
mod events;
mod rng;
mod run;

pub use cfg::handle_cfg_command;
pub use events::handle_events_command;
pub use rng::handle_rng_command;
pub use run::handle_run_command;
