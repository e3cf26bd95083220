//! Portfolio performance and risk statistics over period return series.
//!
//! All functions are pure: they take slices of period returns (0.01 = 1%)
//! plus explicit scalar parameters and return `Result<_, StatError>`. Common
//! parameter defaults live in [`StatsConfig`].
//!
//! ```
//! use perfstat_stats::{path, risk, StatsConfig};
//!
//! let returns = [0.01, -0.02, -0.01, 0.03, -0.05];
//! let cfg = StatsConfig::monthly();
//! let mdd = path::max_drawdown(&returns).unwrap();
//! let var = risk::parametric_var(&returns, cfg.confidence).unwrap();
//! assert!(mdd < 0.0 && var < 0.0);
//! ```

pub mod distribution;
pub mod moments;
pub mod path;
pub mod ratios;
pub mod returns;
pub mod risk;
pub mod summary;
#[cfg(feature = "tracing")]
pub mod telemetry;

pub use perfstat_common::{ConfigError, StatError, StatErrorKind, StatsConfig};
pub use summary::{BenchmarkSummary, PerformanceSummary};
