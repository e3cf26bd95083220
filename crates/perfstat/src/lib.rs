//! Meta crate that re-exports the perfstat building blocks. Depend on this
//! crate for the whole numerical core, or on `perfstat-common` alone when only
//! the error and configuration types are needed.

#[cfg(feature = "common")]
pub use perfstat_common as common;

#[cfg(feature = "stats")]
pub use perfstat_stats as stats;

#[cfg(feature = "common")]
pub use perfstat_common::{ConfigError, StatError, StatErrorKind, StatsConfig};

#[cfg(feature = "stats")]
pub use perfstat_stats::{
    BenchmarkSummary, PerformanceSummary, distribution, moments, path, ratios, returns, risk,
};
