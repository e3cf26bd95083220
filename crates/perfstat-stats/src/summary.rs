//! One-call snapshot of the headline statistics for a return series.

use perfstat_common::{StatError, StatsConfig};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::returns::{annualized_return, annualized_std_dev, period_target};
use crate::{path, ratios, risk};

/// Market-relative statistics, present when a benchmark series is supplied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BenchmarkSummary {
    pub beta: Option<f64>,
    pub jensens_alpha: Option<f64>,
    pub tracking_error: f64,
    pub information_ratio: Option<f64>,
}

/// Headline statistics for one return series.
///
/// Ratios that are undefined for the input (zero denominator, or a VaR
/// confidence the sample cannot support) are `None`; every other failure is
/// returned as an error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerformanceSummary {
    pub periods: usize,
    pub total_return: f64,
    /// Last total-return index value, grown from `StatsConfig::start_value`.
    pub ending_value: f64,
    pub annualized_return: f64,
    pub annualized_std_dev: f64,
    pub sharpe_ratio: Option<f64>,
    pub sortino_ratio: Option<f64>,
    /// Kappa of degree `StatsConfig::lpm_degree` about the per-period
    /// equivalent of `StatsConfig::target_return`.
    pub kappa_ratio: Option<f64>,
    pub max_drawdown: f64,
    pub max_drawdown_duration: usize,
    pub calmar_ratio: Option<f64>,
    pub ulcer_index: f64,
    pub parametric_var: f64,
    pub modified_var: Option<f64>,
    pub historical_var: Option<f64>,
    pub benchmark: Option<BenchmarkSummary>,
}

fn undefined_as_none(result: Result<f64, StatError>) -> Result<Option<f64>, StatError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_undefined_ratio() => Ok(None),
        Err(e) => Err(e),
    }
}

impl PerformanceSummary {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all, fields(periods = returns.len()))
    )]
    pub fn compute(
        returns: &[f64],
        benchmark: Option<&[f64]>,
        config: &StatsConfig,
    ) -> Result<Self, StatError> {
        config.validate()?;
        let freq = config.frequency;
        let index = path::total_return_index(returns, config.start_value)?;
        let ending_value = index.last().copied().unwrap_or(config.start_value);

        let benchmark = match benchmark {
            Some(market) => Some(BenchmarkSummary {
                beta: undefined_as_none(ratios::beta(returns, market))?,
                jensens_alpha: undefined_as_none(ratios::jensens_alpha(
                    returns,
                    market,
                    config.risk_free,
                    freq,
                ))?,
                tracking_error: ratios::tracking_error(returns, market, freq)?,
                information_ratio: undefined_as_none(ratios::information_ratio(
                    returns, market, freq,
                ))?,
            }),
            None => None,
        };

        let summary = Self {
            periods: returns.len(),
            total_return: path::compound_return(returns)?,
            ending_value,
            annualized_return: annualized_return(returns, freq)?,
            annualized_std_dev: annualized_std_dev(returns, freq)?,
            sharpe_ratio: undefined_as_none(ratios::sharpe_ratio(returns, config.risk_free, freq))?,
            sortino_ratio: undefined_as_none(ratios::sortino_ratio(
                returns,
                config.target_return,
                freq,
            ))?,
            kappa_ratio: undefined_as_none(ratios::kappa_ratio(
                returns,
                period_target(config.target_return, freq)?,
                config.lpm_degree,
            ))?,
            max_drawdown: path::max_drawdown(returns)?,
            max_drawdown_duration: path::max_drawdown_duration(returns)?,
            calmar_ratio: undefined_as_none(ratios::calmar_ratio(returns, freq))?,
            ulcer_index: ratios::ulcer_index(returns)?,
            parametric_var: risk::parametric_var(returns, config.confidence)?,
            modified_var: undefined_as_none(risk::modified_parametric_var(
                returns,
                config.confidence,
            ))?,
            historical_var: undefined_as_none(risk::historical_simulation_var(
                returns,
                config.confidence,
            ))?,
            benchmark,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            max_drawdown = summary.max_drawdown,
            parametric_var = summary.parametric_var,
            "performance summary computed"
        );
        Ok(summary)
    }
}
