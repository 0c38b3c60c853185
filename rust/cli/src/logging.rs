//! Tracing subscriber setup for the binary and library entry point.

use tracing_subscriber::EnvFilter;

/// Variable holding the filter directive, e.g. `cardsim_engine=debug`.
pub const LOG_ENV: &str = "CARDSIM_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install a stderr fmt subscriber once per process; later calls are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
