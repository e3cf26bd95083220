//! Composite performance ratios.
//!
//! Annualization convention used throughout:
//! - returns: `(1 + geometric_mean)^frequency - 1`
//! - dispersion: `SD_period * sqrt(frequency)` with the population SD
//! - `risk_free` and annual targets are annual rates
//!
//! Ratios whose denominator evaluates to exactly zero fail with
//! `DivisionByZero`.

use perfstat_common::StatError;
use smallvec::SmallVec;

use crate::moments::{
    array_diff, correlation, covariance_population, lower_partial_moment, mean,
    require_same_len, std_dev_population, upper_partial_moment, variance_population,
};
use crate::path::{average_drawdown, continuous_drawdowns, drawdowns, max_drawdown};
use crate::returns::{annualized_return, annualized_std_dev, check_frequency, period_target};

fn nonzero(denominator: f64, what: &str) -> Result<f64, StatError> {
    if denominator == 0.0 {
        return Err(StatError::division_by_zero(format!("{what} is zero")));
    }
    Ok(denominator)
}

/* ─────────────────────────── market model ───────────────────────── */

/// `cov(returns, market) / var(market)`, population moments.
pub fn beta(returns: &[f64], market: &[f64]) -> Result<f64, StatError> {
    require_same_len(returns, market)?;
    let var_m = nonzero(variance_population(market)?, "market variance")?;
    Ok(covariance_population(returns, market)? / var_m)
}

pub fn sharpe_ratio(returns: &[f64], risk_free: f64, frequency: f64) -> Result<f64, StatError> {
    let excess = annualized_return(returns, frequency)? - risk_free;
    let sd = nonzero(annualized_std_dev(returns, frequency)?, "annualized standard deviation")?;
    Ok(excess / sd)
}

pub fn treynor_ratio(
    returns: &[f64],
    market: &[f64],
    risk_free: f64,
    frequency: f64,
) -> Result<f64, StatError> {
    let b = nonzero(beta(returns, market)?, "beta")?;
    Ok((annualized_return(returns, frequency)? - risk_free) / b)
}

/// `(Rp - rf) - beta * (Rm - rf)` on annualized returns.
pub fn jensens_alpha(
    returns: &[f64],
    market: &[f64],
    risk_free: f64,
    frequency: f64,
) -> Result<f64, StatError> {
    let b = beta(returns, market)?;
    let rp = annualized_return(returns, frequency)?;
    let rm = annualized_return(market, frequency)?;
    Ok((rp - risk_free) - b * (rm - risk_free))
}

/// Modigliani risk-adjusted return: the portfolio Sharpe ratio scaled to
/// market volatility.
pub fn m_squared(
    returns: &[f64],
    market: &[f64],
    risk_free: f64,
    frequency: f64,
) -> Result<f64, StatError> {
    require_same_len(returns, market)?;
    let sharpe = sharpe_ratio(returns, risk_free, frequency)?;
    Ok(sharpe * annualized_std_dev(market, frequency)? + risk_free)
}

pub fn r_squared(returns: &[f64], market: &[f64]) -> Result<f64, StatError> {
    let rho = correlation(returns, market)?;
    Ok(rho * rho)
}

/* ───────────────────────── Fama decomposition ───────────────────── */

pub const FAMA_TOTAL: &str = "Total excess return";
pub const FAMA_RISK: &str = "Risk";
pub const FAMA_SELECTIVITY: &str = "Selectivity";
pub const FAMA_DIVERSIFICATION: &str = "Diversification";
pub const FAMA_NET_SELECTIVITY: &str = "Net selectivity";
pub const FAMA_INVESTOR_RISK: &str = "Investor's risk";
pub const FAMA_MANAGER_RISK: &str = "Manager's risk";

/// Ordered `(label, value)` table splitting the annualized excess return.
///
/// `Risk + Selectivity` always equals the total excess return; with a target
/// beta, `Investor's risk + Manager's risk` equals `Risk`.
#[derive(Debug, Clone, PartialEq)]
pub struct FamaDecomposition {
    rows: SmallVec<[(&'static str, f64); 7]>,
}

impl FamaDecomposition {
    pub fn rows(&self) -> &[(&'static str, f64)] {
        &self.rows
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|(l, _)| *l == label)
            .map(|&(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a FamaDecomposition {
    type Item = &'a (&'static str, f64);
    type IntoIter = std::slice::Iter<'a, (&'static str, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

pub fn fama_decomposition(
    returns: &[f64],
    market: &[f64],
    risk_free: f64,
    frequency: f64,
    target_beta: Option<f64>,
) -> Result<FamaDecomposition, StatError> {
    let b = beta(returns, market)?;
    let rp = annualized_return(returns, frequency)?;
    let rm = annualized_return(market, frequency)?;
    let sigma_p = annualized_std_dev(returns, frequency)?;
    let sigma_m = annualized_std_dev(market, frequency)?;
    let market_premium = rm - risk_free;

    let total = rp - risk_free;
    let risk = b * market_premium;
    let selectivity = total - risk;
    let diversification = (sigma_p / sigma_m - b) * market_premium;

    let mut rows: SmallVec<[(&'static str, f64); 7]> = SmallVec::new();
    rows.push((FAMA_TOTAL, total));
    rows.push((FAMA_RISK, risk));
    rows.push((FAMA_SELECTIVITY, selectivity));
    rows.push((FAMA_DIVERSIFICATION, diversification));
    rows.push((FAMA_NET_SELECTIVITY, selectivity - diversification));
    if let Some(target) = target_beta {
        if !target.is_finite() {
            return Err(StatError::invalid_parameter(format!(
                "target beta must be finite, got {target}"
            )));
        }
        rows.push((FAMA_INVESTOR_RISK, target * market_premium));
        rows.push((FAMA_MANAGER_RISK, (b - target) * market_premium));
    }
    Ok(FamaDecomposition { rows })
}

/* ─────────────────────────── downside ratios ────────────────────── */

/// Annualized excess over an annual target per unit of annualized downside
/// deviation (second lower partial moment about the de-annualized target).
pub fn sortino_ratio(returns: &[f64], target: f64, frequency: f64) -> Result<f64, StatError> {
    let per_period = period_target(target, frequency)?;
    let downside = lower_partial_moment(returns, per_period, 2.0)?.sqrt() * frequency.sqrt();
    let downside = nonzero(downside, "downside deviation")?;
    Ok((annualized_return(returns, frequency)? - target) / downside)
}

/// `UPM1 / LPM1` about a period target.
pub fn omega_ratio(returns: &[f64], target: f64) -> Result<f64, StatError> {
    let lpm = nonzero(lower_partial_moment(returns, target, 1.0)?, "first lower partial moment")?;
    Ok(upper_partial_moment(returns, target, 1.0)? / lpm)
}

/// `UPM1 / sqrt(LPM2)` about a period target.
pub fn upside_potential_ratio(returns: &[f64], target: f64) -> Result<f64, StatError> {
    let lpm = lower_partial_moment(returns, target, 2.0)?.sqrt();
    let lpm = nonzero(lpm, "downside deviation")?;
    Ok(upper_partial_moment(returns, target, 1.0)? / lpm)
}

/// `(mean - target) / LPM_n^(1/n)` about a period target; `degree` > 0.
pub fn kappa_ratio(returns: &[f64], target: f64, degree: f64) -> Result<f64, StatError> {
    if !(degree > 0.0 && degree.is_finite()) {
        return Err(StatError::invalid_parameter(format!(
            "kappa degree must be positive, got {degree}"
        )));
    }
    let lpm = nonzero(lower_partial_moment(returns, target, degree)?, "lower partial moment")?;
    Ok((mean(returns)? - target) / lpm.powf(1.0 / degree))
}

/* ─────────────────────────── drawdown ratios ────────────────────── */

pub fn calmar_ratio(returns: &[f64], frequency: f64) -> Result<f64, StatError> {
    let mdd = nonzero(max_drawdown(returns)?.abs(), "maximum drawdown")?;
    Ok(annualized_return(returns, frequency)? / mdd)
}

/// Root mean square of the drawdown series over periods `1..=N`.
pub fn ulcer_index(returns: &[f64]) -> Result<f64, StatError> {
    let dd = drawdowns(returns)?;
    let sum_sq: f64 = dd[1..].iter().map(|d| d * d).sum();
    Ok((sum_sq / returns.len() as f64).sqrt())
}

pub fn martin_ratio(returns: &[f64], frequency: f64) -> Result<f64, StatError> {
    let ulcer = nonzero(ulcer_index(returns)?, "ulcer index")?;
    Ok(annualized_return(returns, frequency)? / ulcer)
}

/// Annualized return over the average of the `count` deepest continuous
/// drawdowns.
pub fn sterling_ratio(returns: &[f64], frequency: f64, count: Option<f64>) -> Result<f64, StatError> {
    let avg = nonzero(average_drawdown(returns, count)?.abs(), "average drawdown")?;
    Ok(annualized_return(returns, frequency)? / avg)
}

/// Annualized return over the root sum of squared continuous drawdowns.
pub fn burke_ratio(returns: &[f64], frequency: f64) -> Result<f64, StatError> {
    let ann = annualized_return(returns, frequency)?;
    let sum_sq: f64 = continuous_drawdowns(returns).iter().map(|d| d * d).sum();
    let denom = nonzero(sum_sq.sqrt(), "drawdown dispersion")?;
    Ok(ann / denom)
}

/* ─────────────────────────── active ratios ──────────────────────── */

/// Annualized standard deviation of the per-period active return.
pub fn tracking_error(returns: &[f64], benchmark: &[f64], frequency: f64) -> Result<f64, StatError> {
    check_frequency(frequency)?;
    let active = array_diff(returns, benchmark)?;
    Ok(std_dev_population(&active)? * frequency.sqrt())
}

pub fn information_ratio(
    returns: &[f64],
    benchmark: &[f64],
    frequency: f64,
) -> Result<f64, StatError> {
    let te = nonzero(tracking_error(returns, benchmark, frequency)?, "tracking error")?;
    let active = annualized_return(returns, frequency)? - annualized_return(benchmark, frequency)?;
    Ok(active / te)
}
