//! Return-path analytics: total-return index, drawdowns, losing streaks,
//! peaks and troughs.
//!
//! Every function rebuilds the index from the period returns; nothing is
//! cached between calls. Index-based functions start the index at 1.

use perfstat_common::StatError;

use crate::moments::require_len;

/// `index[0] = start_value`, `index[i] = index[i-1] * (1 + r[i-1])`.
pub fn total_return_index(returns: &[f64], start_value: f64) -> Result<Vec<f64>, StatError> {
    require_len(returns, 1)?;
    if !start_value.is_finite() {
        return Err(StatError::invalid_parameter(format!(
            "start value must be finite, got {start_value}"
        )));
    }
    let mut index = Vec::with_capacity(returns.len() + 1);
    let mut level = start_value;
    index.push(level);
    for r in returns {
        level *= 1.0 + r;
        index.push(level);
    }
    Ok(index)
}

/// `product(1 + r) - 1` over the whole series.
pub fn compound_return(returns: &[f64]) -> Result<f64, StatError> {
    require_len(returns, 1)?;
    Ok(returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0)
}

/// Drawdown from the running peak at every index position; entry 0 is 0.
///
/// Single pass with an incrementally tracked peak. Positive rounding
/// artifacts are clamped to 0.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(periods = returns.len()))
)]
pub fn drawdowns(returns: &[f64]) -> Result<Vec<f64>, StatError> {
    let index = total_return_index(returns, 1.0)?;
    let mut out = Vec::with_capacity(index.len());
    let mut peak = index[0];
    out.push(0.0);
    for &level in &index[1..] {
        if level > peak {
            peak = level;
        }
        out.push((level / peak - 1.0).min(0.0));
    }
    Ok(out)
}

pub fn max_drawdown(returns: &[f64]) -> Result<f64, StatError> {
    Ok(drawdowns(returns)?.into_iter().fold(0.0, f64::min))
}

/// Compounded loss of every maximal run of strictly negative returns.
///
/// ```
/// use perfstat_stats::path::continuous_drawdowns;
///
/// let runs = continuous_drawdowns(&[0.01, -0.02, -0.01, 0.03, -0.05]);
/// assert_eq!(runs.len(), 2);
/// assert!((runs[0] - (-0.0298)).abs() < 1e-12);
/// assert!((runs[1] - (-0.05)).abs() < 1e-12);
/// ```
pub fn continuous_drawdowns(returns: &[f64]) -> Vec<f64> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < returns.len() {
        if returns[i] >= 0.0 {
            i += 1;
            continue;
        }
        let mut acc = 0.0;
        while i < returns.len() && returns[i] < 0.0 {
            acc = (1.0 + acc) * (1.0 + returns[i]) - 1.0;
            i += 1;
        }
        if acc < 0.0 {
            out.push(acc);
        }
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(periods = returns.len(), runs = out.len(), "continuous drawdown scan");
    out
}

/// Mean of the `count` deepest continuous drawdowns (all of them when `None`).
///
/// `count` is truncated toward zero and must be at least 1 afterwards; a
/// count larger than the number of runs averages every run. A series with
/// no losing run averages to 0.
pub fn average_drawdown(returns: &[f64], count: Option<f64>) -> Result<f64, StatError> {
    require_len(returns, 1)?;
    let limit = match count {
        None => None,
        Some(c) => {
            let whole = c.trunc();
            if !whole.is_finite() || whole < 1.0 {
                return Err(StatError::invalid_parameter(format!(
                    "drawdown count must be a positive integer, got {c}"
                )));
            }
            Some(whole as usize)
        }
    };

    let mut runs = continuous_drawdowns(returns);
    let take = limit.map_or(runs.len(), |k| k.min(runs.len()));
    if take == 0 {
        return Ok(0.0);
    }
    runs.sort_by(f64::total_cmp);
    Ok(runs[..take].iter().sum::<f64>() / take as f64)
}

/// Strict extremum at `j` against every neighbour that exists; a single
/// level has no neighbour and is never an extremum.
fn is_extremum(levels: &[f64], j: usize, beyond: fn(f64, f64) -> bool) -> bool {
    if levels.len() < 2 {
        return false;
    }
    let level = levels[j];
    let left = j.checked_sub(1).map(|k| levels[k]);
    let right = levels.get(j + 1).copied();
    left.is_none_or(|l| beyond(level, l)) && right.is_none_or(|r| beyond(level, r))
}

fn above(level: f64, other: f64) -> bool {
    level > other
}

fn below(level: f64, other: f64) -> bool {
    level < other
}

/// Index value at strict local extrema over `index[1..]`, 0 elsewhere.
fn local_extrema(returns: &[f64], beyond: fn(f64, f64) -> bool) -> Result<Vec<f64>, StatError> {
    let index = total_return_index(returns, 1.0)?;
    let levels = &index[1..];
    Ok((0..levels.len())
        .map(|j| if is_extremum(levels, j, beyond) { levels[j] } else { 0.0 })
        .collect())
}

/// Index value at each strict local maximum of the total-return index.
///
/// The first and last periods are compared with their single neighbour; a
/// one-period series has no neighbour and yields `[0]`.
pub fn peaks(returns: &[f64]) -> Result<Vec<f64>, StatError> {
    local_extrema(returns, above)
}

/// Index value at each strict local minimum; boundaries as in [`peaks`].
pub fn troughs(returns: &[f64]) -> Result<Vec<f64>, StatError> {
    local_extrema(returns, below)
}

/// Longest gap, in periods, between successive new-high peaks.
///
/// A new-high peak is a period that is a peak in the sense of [`peaks`] and
/// lies above every earlier index value, the start value included. Returns 0
/// when fewer than two such peaks occur, so a steadily rising index has no
/// duration.
pub fn max_drawdown_duration(returns: &[f64]) -> Result<usize, StatError> {
    let index = total_return_index(returns, 1.0)?;
    let levels = &index[1..];
    let mut high = index[0];
    let mut last_peak: Option<usize> = None;
    let mut longest = 0usize;
    for (j, &level) in levels.iter().enumerate() {
        if level <= high {
            continue;
        }
        high = level;
        if is_extremum(levels, j, above) {
            if let Some(prev) = last_peak {
                longest = longest.max(j - prev);
            }
            last_peak = Some(j);
        }
    }
    Ok(longest)
}

/// Mean depth of the drawdown series over periods `1..=N`.
pub fn pain_index(returns: &[f64]) -> Result<f64, StatError> {
    let dd = drawdowns(returns)?;
    let depth: f64 = dd[1..].iter().map(|d| d.abs()).sum();
    Ok(depth / returns.len() as f64)
}
