//! Moment statistics over return series.
//!
//! Population forms divide by `N`; sample forms apply the usual unbiased
//! rescaling (`N/(N-1)` for second moments, the spreadsheet SKEW/KURT factors
//! for third and fourth moments).
//!
//! Notes:
//! - Partial moments normalise by the FULL series length, while the
//!   semi-variance works on the below-target subset with its own count. Both
//!   conventions are relied on by the ratio layer and must not be unified.
//! - Zero dispersion in a standardized moment is reported as `DivisionByZero`.

use perfstat_common::StatError;

pub(crate) fn require_len(data: &[f64], needed: usize) -> Result<(), StatError> {
    if data.len() < needed {
        return Err(StatError::insufficient_data(needed, data.len()));
    }
    Ok(())
}

pub(crate) fn require_same_len(x: &[f64], y: &[f64]) -> Result<(), StatError> {
    if x.len() != y.len() {
        return Err(StatError::length_mismatch(x.len(), y.len()));
    }
    Ok(())
}

/// Two-pass mean. A constant series returns its value exactly, so its
/// deviations (and every moment built on them) are exactly zero.
fn mean_of(data: &[f64]) -> f64 {
    let Some(&first) = data.first() else {
        return f64::NAN;
    };
    if data.iter().all(|&v| v == first) {
        return first;
    }
    let n = data.len() as f64;
    let m = data.iter().sum::<f64>() / n;
    m + data.iter().map(|v| v - m).sum::<f64>() / n
}

/// Arithmetic mean.
pub fn mean(data: &[f64]) -> Result<f64, StatError> {
    require_len(data, 1)?;
    Ok(mean_of(data))
}

/* ───────────────────────── second moments ───────────────────────── */

pub fn variance_population(data: &[f64]) -> Result<f64, StatError> {
    require_len(data, 1)?;
    let m = mean_of(data);
    let sum_sq: f64 = data.iter().map(|v| (v - m) * (v - m)).sum();
    Ok(sum_sq / data.len() as f64)
}

pub fn variance_sample(data: &[f64]) -> Result<f64, StatError> {
    require_len(data, 2)?;
    let n = data.len() as f64;
    Ok(variance_population(data)? * n / (n - 1.0))
}

pub fn std_dev_population(data: &[f64]) -> Result<f64, StatError> {
    Ok(variance_population(data)?.sqrt())
}

pub fn std_dev_sample(data: &[f64]) -> Result<f64, StatError> {
    Ok(variance_sample(data)?.sqrt())
}

pub fn covariance_population(x: &[f64], y: &[f64]) -> Result<f64, StatError> {
    require_same_len(x, y)?;
    require_len(x, 1)?;
    let mx = mean_of(x);
    let my = mean_of(y);
    let sum: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    Ok(sum / x.len() as f64)
}

pub fn covariance_sample(x: &[f64], y: &[f64]) -> Result<f64, StatError> {
    require_same_len(x, y)?;
    require_len(x, 2)?;
    let n = x.len() as f64;
    Ok(covariance_population(x, y)? * n / (n - 1.0))
}

/// Pearson correlation from population moments.
pub fn correlation(x: &[f64], y: &[f64]) -> Result<f64, StatError> {
    let cov = covariance_population(x, y)?;
    let denom = std_dev_population(x)? * std_dev_population(y)?;
    if denom == 0.0 {
        return Err(StatError::division_by_zero(
            "correlation of a series with zero standard deviation",
        ));
    }
    Ok(cov / denom)
}

/* ─────────────────────── standardized moments ───────────────────── */

/// Mean of `((x - mean) / sd_pop)^power`.
fn standardized_moment(data: &[f64], power: i32) -> Result<f64, StatError> {
    let sd = std_dev_population(data)?;
    if sd == 0.0 {
        return Err(StatError::division_by_zero(
            "standardized moment of a series with zero standard deviation",
        ));
    }
    let m = mean_of(data);
    let sum: f64 = data.iter().map(|v| ((v - m) / sd).powi(power)).sum();
    Ok(sum / data.len() as f64)
}

pub fn skewness_population(data: &[f64]) -> Result<f64, StatError> {
    standardized_moment(data, 3)
}

pub fn skewness_sample(data: &[f64]) -> Result<f64, StatError> {
    if data.len() <= 2 {
        return Err(StatError::degenerate_sample(2, data.len()));
    }
    let n = data.len() as f64;
    Ok(skewness_population(data)? * (n * (n - 1.0)).sqrt() / (n - 2.0))
}

pub fn kurtosis_population(data: &[f64]) -> Result<f64, StatError> {
    standardized_moment(data, 4)
}

pub fn kurtosis_population_excess(data: &[f64]) -> Result<f64, StatError> {
    Ok(kurtosis_population(data)? - 3.0)
}

/// `N(N+1) / ((N-1)(N-2)(N-3)) * Σ((x - mean) / s)^4` with `s` the sample SD.
pub fn kurtosis_sample(data: &[f64]) -> Result<f64, StatError> {
    if data.len() <= 3 {
        return Err(StatError::degenerate_sample(3, data.len()));
    }
    let n = data.len() as f64;
    let s = std_dev_sample(data)?;
    if s == 0.0 {
        return Err(StatError::division_by_zero(
            "kurtosis of a series with zero standard deviation",
        ));
    }
    let m = mean_of(data);
    let sum_fourth: f64 = data.iter().map(|v| ((v - m) / s).powi(4)).sum();
    Ok((n * (n + 1.0)) / ((n - 1.0) * (n - 2.0) * (n - 3.0)) * sum_fourth)
}

/// The spreadsheet `KURT` estimator.
pub fn kurtosis_sample_excess(data: &[f64]) -> Result<f64, StatError> {
    let k = kurtosis_sample(data)?;
    let n = data.len() as f64;
    Ok(k - 3.0 * (n - 1.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0)))
}

/* ───────────────────────── partial moments ──────────────────────── */

fn check_degree(degree: f64) -> Result<(), StatError> {
    if !degree.is_finite() || degree < 0.0 {
        return Err(StatError::invalid_parameter(format!(
            "partial moment degree must be >= 0, got {degree}"
        )));
    }
    Ok(())
}

/// `Σ_{x < target} (target - x)^degree / N`.
pub fn lower_partial_moment(data: &[f64], target: f64, degree: f64) -> Result<f64, StatError> {
    check_degree(degree)?;
    require_len(data, 1)?;
    let sum: f64 = data
        .iter()
        .filter(|&&v| v < target)
        .map(|v| (target - v).powf(degree))
        .sum();
    Ok(sum / data.len() as f64)
}

/// `Σ_{x > target} (x - target)^degree / N`.
pub fn upper_partial_moment(data: &[f64], target: f64, degree: f64) -> Result<f64, StatError> {
    check_degree(degree)?;
    require_len(data, 1)?;
    let sum: f64 = data
        .iter()
        .filter(|&&v| v > target)
        .map(|v| (v - target).powf(degree))
        .sum();
    Ok(sum / data.len() as f64)
}

pub fn semi_variance_population(data: &[f64], target: f64) -> Result<f64, StatError> {
    let below: Vec<f64> = data.iter().copied().filter(|&v| v < target).collect();
    if below.is_empty() {
        return Err(StatError::insufficient_data(1, 0)
            .with_message(format!("no observations below target {target}")));
    }
    variance_population(&below)
}

pub fn semi_deviation_population(data: &[f64], target: f64) -> Result<f64, StatError> {
    Ok(semi_variance_population(data, target)?.sqrt())
}

/* ───────────────────────── series differences ───────────────────── */

pub fn array_diff(a: &[f64], b: &[f64]) -> Result<Vec<f64>, StatError> {
    require_same_len(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

/// Relative performance: `(1 + a) / (1 + b) - 1` per period.
pub fn array_diff_geometric(a: &[f64], b: &[f64]) -> Result<Vec<f64>, StatError> {
    require_same_len(a, b)?;
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let base = 1.0 + y;
            if base == 0.0 {
                return Err(StatError::division_by_zero(
                    "benchmark return of -100% in geometric difference",
                ));
            }
            Ok((1.0 + x) / base - 1.0)
        })
        .collect()
}
