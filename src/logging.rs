//! Diagnostic logging setup.
//!
//! Build progress goes to stderr through `tracing`; stdout is reserved for the
//! command results printed by `init` and `build`. `RUST_LOG` overrides the
//! default `silvera=info` filter.

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "silvera=info";

/// Install the global subscriber. Call once, before any command runs.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A subscriber may already be installed when embedded; keep that one.
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
