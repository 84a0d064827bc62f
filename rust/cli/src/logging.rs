//! Diagnostic logging for the `holdem` binary.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a formatting subscriber writing to stderr.
///
/// Engine events (`holdem_engine`, `holdem_ai`) are filtered through
/// `RUST_LOG`, e.g. `RUST_LOG=holdem_engine=debug holdem sim`. Calling this
/// more than once is harmless; later calls leave the first subscriber in place.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
