//! Value-at-Risk estimators.
//!
//! VaR is reported as a period return (negative for a loss) at the
//! `1 - confidence` quantile of the return distribution.
//!
//! Notes:
//! - Parametric forms use the population mean and standard deviation.
//! - The Cornish-Fisher form uses population skewness and population excess
//!   kurtosis.
//! - Historical simulation follows the exclusive-percentile rule (rank basis
//!   `N + 1`), so high confidence on short samples is `OutOfRange` instead of
//!   clamped to the sample minimum.

use perfstat_common::StatError;

use crate::distribution::{inverse_normal_cdf, normal_pdf};
use crate::moments::{
    kurtosis_population_excess, mean, require_len, skewness_population, std_dev_population,
};

/// Tail probability `alpha = 1 - confidence`, validated.
fn tail_probability(confidence: f64) -> Result<f64, StatError> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(StatError::invalid_parameter(format!(
            "confidence must lie strictly between 0 and 1, got {confidence}"
        )));
    }
    Ok(1.0 - confidence)
}

/// `mean + z(1 - confidence) * sd`.
pub fn parametric_var(returns: &[f64], confidence: f64) -> Result<f64, StatError> {
    let alpha = tail_probability(confidence)?;
    let z = inverse_normal_cdf(alpha, 0.0, 1.0)?;
    Ok(mean(returns)? + z * std_dev_population(returns)?)
}

/// Cornish-Fisher adjusted quantile for the given skew and excess kurtosis.
pub fn cornish_fisher_quantile(z: f64, skew: f64, excess_kurtosis: f64) -> f64 {
    let z2 = z * z;
    let z3 = z2 * z;
    z + (z2 - 1.0) / 6.0 * skew + (z3 - 3.0 * z) / 24.0 * excess_kurtosis
        - (2.0 * z3 - 5.0 * z) / 36.0 * skew * skew
}

/// Parametric VaR with the normal quantile corrected for skewness and
/// excess kurtosis.
///
/// # Errors
/// - `DivisionByZero` for a constant series (shape moments are undefined).
pub fn modified_parametric_var(returns: &[f64], confidence: f64) -> Result<f64, StatError> {
    let alpha = tail_probability(confidence)?;
    let z = inverse_normal_cdf(alpha, 0.0, 1.0)?;
    let skew = skewness_population(returns)?;
    let kurt = kurtosis_population_excess(returns)?;
    let adjusted = cornish_fisher_quantile(z, skew, kurt);
    Ok(mean(returns)? + adjusted * std_dev_population(returns)?)
}

/// Empirical quantile with linear interpolation between order statistics.
///
/// ```
/// use perfstat_stats::risk::historical_simulation_var;
///
/// let var = historical_simulation_var(&[0.08, -0.02, 0.0, -0.05, 0.03], 0.80).unwrap();
/// assert!((var - (-0.044)).abs() < 1e-12);
/// ```
///
/// # Errors
/// - `OutOfRange` when `alpha * (N + 1) - 1` falls outside `[0, N - 1]`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip_all,
        fields(periods = returns.len(), confidence = confidence)
    )
)]
pub fn historical_simulation_var(returns: &[f64], confidence: f64) -> Result<f64, StatError> {
    let alpha = tail_probability(confidence)?;
    require_len(returns, 1)?;
    let mut sorted = returns.to_vec();
    sorted.sort_by(f64::total_cmp);
    exclusive_quantile(&sorted, alpha)
}

/// Ranks this close to an integer are taken as that integer; `1 - confidence`
/// is rarely exact in binary.
const RANK_SNAP: f64 = 1e-9;

fn exclusive_quantile(sorted: &[f64], alpha: f64) -> Result<f64, StatError> {
    let n = sorted.len();
    let raw = alpha * (n as f64 + 1.0) - 1.0;
    let nearest = raw.round();
    let rank = if (raw - nearest).abs() < RANK_SNAP {
        nearest
    } else {
        raw
    };
    if rank < 0.0 || rank > (n - 1) as f64 {
        #[cfg(feature = "tracing")]
        tracing::debug!(rank, periods = n, "historical VaR rank outside sample");
        return Err(StatError::out_of_range(format!(
            "{n} observations cannot support a {:.4} tail quantile",
            alpha
        )));
    }
    let lo = rank.floor() as usize;
    let frac = rank - lo as f64;
    if lo + 1 >= n || frac == 0.0 {
        return Ok(sorted[lo]);
    }
    Ok(sorted[lo] + (sorted[lo + 1] - sorted[lo]) * frac)
}

/// Normal expected shortfall: `mean - sd * phi(z) / alpha`.
pub fn parametric_expected_shortfall(returns: &[f64], confidence: f64) -> Result<f64, StatError> {
    let alpha = tail_probability(confidence)?;
    let z = inverse_normal_cdf(alpha, 0.0, 1.0)?;
    Ok(mean(returns)? - std_dev_population(returns)? * normal_pdf(z) / alpha)
}

/// Mean of the returns at or below the historical-simulation VaR.
pub fn historical_expected_shortfall(returns: &[f64], confidence: f64) -> Result<f64, StatError> {
    let var = historical_simulation_var(returns, confidence)?;
    let tail: Vec<f64> = returns.iter().copied().filter(|&r| r <= var).collect();
    // the interpolated VaR is never below the sample minimum
    mean(&tail)
}
