//! Opt-in log output for the `tracing` spans and events emitted by this
//! crate. Compiled only with the `tracing` feature.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives, e.g.
/// `PERFSTAT_LOG=perfstat_stats=debug`.
pub const LOG_ENV: &str = "PERFSTAT_LOG";

const DEFAULT_DIRECTIVES: &str = "perfstat_stats=info";

/// Install a global fmt subscriber filtered by [`LOG_ENV`].
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one is left in place.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
