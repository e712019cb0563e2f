//! Diagnostic logging
//!
//! Operator-facing progress goes to stdout through the CLI; row-level
//! diagnostics go through `tracing` to stderr.

use tracing_subscriber::EnvFilter;

/// Default filter for a given `-v` count. `RUST_LOG` overrides it.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "nfl_import=warn",
        1 => "nfl_import=info",
        _ => "nfl_import=debug",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(verbosity).into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
