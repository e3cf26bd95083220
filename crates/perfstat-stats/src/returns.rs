//! Period returns from prices, and the annualization conventions shared by
//! every ratio.
//!
//! - Returns annualize geometrically: `(1 + geometric_mean)^frequency - 1`.
//! - Dispersion annualizes by `SD_period * sqrt(frequency)`, population SD.

use perfstat_common::StatError;

use crate::moments::{require_len, std_dev_population};

pub(crate) fn check_frequency(frequency: f64) -> Result<(), StatError> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(StatError::invalid_parameter(format!(
            "frequency must be a positive number of periods per year, got {frequency}"
        )));
    }
    Ok(())
}

/// Per-period equivalent of an annual target: `(1 + target)^(1/frequency) - 1`.
pub(crate) fn period_target(annual_target: f64, frequency: f64) -> Result<f64, StatError> {
    check_frequency(frequency)?;
    if !(annual_target > -1.0 && annual_target.is_finite()) {
        return Err(StatError::invalid_parameter(format!(
            "annual target return must exceed -100%, got {annual_target}"
        )));
    }
    Ok((1.0 + annual_target).powf(1.0 / frequency) - 1.0)
}

/// Period returns from a price series, crediting any cash flow paid at the
/// end of the period.
///
/// `cash_flows[i]` belongs to the period ending at `prices[i]`; the entry at
/// index 0 is ignored and missing trailing entries count as zero.
///
/// # Errors
/// - `InsufficientData` for fewer than two prices.
/// - `LengthMismatch` when there are more cash flows than prices.
/// - `DivisionByZero` when a period starts from a price of zero.
pub fn returns_from_prices(prices: &[f64], cash_flows: Option<&[f64]>) -> Result<Vec<f64>, StatError> {
    require_len(prices, 2)?;
    let flows = cash_flows.unwrap_or(&[]);
    if flows.len() > prices.len() {
        return Err(StatError::length_mismatch(flows.len(), prices.len())
            .with_message("cash flow series is longer than the price series"));
    }
    prices
        .windows(2)
        .enumerate()
        .map(|(k, w)| {
            let (start, end) = (w[0], w[1]);
            if start == 0.0 {
                return Err(StatError::division_by_zero(format!(
                    "price of zero at the start of period {}",
                    k + 1
                )));
            }
            let flow = flows.get(k + 1).copied().unwrap_or(0.0);
            Ok((end + flow - start) / start)
        })
        .collect()
}

/// `(product(1 + r))^(1/N) - 1`.
pub fn geometric_mean(returns: &[f64]) -> Result<f64, StatError> {
    require_len(returns, 1)?;
    let growth = returns.iter().fold(1.0, |acc, r| acc * (1.0 + r));
    if growth <= 0.0 {
        return Err(StatError::invalid_parameter(
            "geometric mean undefined: cumulative growth is not positive",
        ));
    }
    Ok(growth.powf(1.0 / returns.len() as f64) - 1.0)
}

pub fn annualized_return(returns: &[f64], frequency: f64) -> Result<f64, StatError> {
    check_frequency(frequency)?;
    Ok((1.0 + geometric_mean(returns)?).powf(frequency) - 1.0)
}

pub fn annualized_std_dev(returns: &[f64], frequency: f64) -> Result<f64, StatError> {
    check_frequency(frequency)?;
    Ok(std_dev_population(returns)? * frequency.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfstat_common::StatErrorKind;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn price_returns_without_flows() {
        let r = returns_from_prices(&[100.0, 110.0, 99.0], None).unwrap();
        assert_eq!(r.len(), 2);
        assert!(close(r[0], 0.1));
        assert!(close(r[1], -0.1));
    }

    #[test]
    fn cash_flows_skip_period_zero() {
        // the 7.0 at index 0 belongs to no period
        let r = returns_from_prices(&[100.0, 100.0, 100.0], Some(&[7.0, 2.0])).unwrap();
        assert!(close(r[0], 0.02));
        assert_eq!(r[1], 0.0);
        assert_eq!(
            returns_from_prices(&[100.0, 101.0], Some(&[0.0, 0.0, 1.0]))
                .unwrap_err()
                .kind,
            StatErrorKind::LengthMismatch
        );
    }

    #[test]
    fn price_edge_cases() {
        assert_eq!(
            returns_from_prices(&[100.0], None).unwrap_err().kind,
            StatErrorKind::InsufficientData
        );
        assert_eq!(
            returns_from_prices(&[100.0, 0.0, 5.0], None).unwrap_err().kind,
            StatErrorKind::DivisionByZero
        );
    }

    #[test]
    fn geometric_annualization() {
        assert!(close(geometric_mean(&[0.1, 0.1]).unwrap(), 0.1));
        let monthly = [0.01; 12];
        let ann = annualized_return(&monthly, 12.0).unwrap();
        assert!(close(ann, 1.01f64.powi(12) - 1.0));
        assert_eq!(
            geometric_mean(&[-1.0, 0.5]).unwrap_err().kind,
            StatErrorKind::InvalidParameter
        );
    }

    #[test]
    fn annual_target_de_annualizes_geometrically() {
        assert!(close(period_target(1.01f64.powi(12) - 1.0, 12.0).unwrap(), 0.01));
        assert_eq!(period_target(0.0, 252.0).unwrap(), 0.0);
        assert_eq!(
            period_target(-1.0, 12.0).unwrap_err().kind,
            StatErrorKind::InvalidParameter
        );
    }

    #[test]
    fn sd_scales_with_root_frequency() {
        let r = [0.01, -0.01, 0.01, -0.01];
        assert!(close(annualized_std_dev(&r, 12.0).unwrap(), 0.01 * 12f64.sqrt()));
        assert_eq!(
            annualized_std_dev(&r, 0.0).unwrap_err().kind,
            StatErrorKind::InvalidParameter
        );
    }
}
