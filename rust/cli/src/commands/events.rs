//! The `events` command: list built-in events and what catalogs they need.

use cardsim_engine::{Event, EventKind};
use std::io::Write;

use crate::error::CliError;

pub fn handle_events_command(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "{:<3} {:<16} {:<6} description", "#", "name", "attrs")?;
    for kind in EventKind::ALL {
        writeln!(
            out,
            "{:<3} {:<16} {:<6} {}",
            kind.selector(),
            kind.name(),
            kind.required_attributes(),
            kind.description()
        )?;
    }
    Ok(())
}
