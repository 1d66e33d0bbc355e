//! Process-wide log output.
//!
//! Binaries call [`init`] once at start-up; library code only emits
//! `tracing` events.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the subscriber. `RUST_LOG` wins over the `verbose` switch.
pub fn init(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}
