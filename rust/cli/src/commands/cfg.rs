//! Configuration command handler.
//!
//! Prints every resolved setting with the layer it came from:
//!
//! ```json
//! {
//!   "threads": { "value": 8, "source": "default" },
//!   "iterations": { "value": 2500000, "source": "env" },
//!   ...
//! }
//! ```

use crate::config::{self, ConfigResolved};
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    write_resolved(&resolved, out)
}

fn write_resolved(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "threads": {
            "value": config.threads,
            "source": sources.threads,
        },
        "iterations": {
            "value": config.iterations,
            "source": sources.iterations,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "multipliers": {
            "value": config.multipliers,
            "source": sources.multipliers,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
