use perfstat_stats::distribution::inverse_normal_cdf;
use perfstat_stats::moments::{
    kurtosis_sample_excess, skewness_population, variance_population, variance_sample,
};
use perfstat_stats::path::{
    continuous_drawdowns, drawdowns, max_drawdown, max_drawdown_duration, pain_index,
    total_return_index,
};
use perfstat_stats::ratios::{beta, ulcer_index};
use perfstat_stats::risk::{historical_simulation_var, modified_parametric_var};
use perfstat_stats::StatErrorKind;
use proptest::prelude::*;

fn return_series(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.5f64..0.5, 1..max_len)
}

proptest! {
    #[test]
    fn sample_variance_rescales_population(r in prop::collection::vec(-0.5f64..0.5, 2..60)) {
        let pop = variance_population(&r).unwrap();
        prop_assume!(pop > 1e-12);
        let n = r.len() as f64;
        let ratio = variance_sample(&r).unwrap() / pop;
        prop_assert!((ratio - n / (n - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn drawdowns_are_never_positive(r in return_series(80)) {
        let dd = drawdowns(&r).unwrap();
        prop_assert_eq!(dd.len(), r.len() + 1);
        prop_assert_eq!(dd[0], 0.0);
        prop_assert!(dd.iter().all(|&d| d <= 0.0));
    }

    #[test]
    fn index_follows_recurrence(r in return_series(80), start in 0.5f64..1000.0) {
        let idx = total_return_index(&r, start).unwrap();
        prop_assert_eq!(idx[0], start);
        for i in 1..idx.len() {
            prop_assert_eq!(idx[i], idx[i - 1] * (1.0 + r[i - 1]));
        }
    }

    #[test]
    fn max_drawdown_is_deepest_point(r in return_series(80)) {
        let dd = drawdowns(&r).unwrap();
        let deepest = dd.iter().copied().fold(f64::INFINITY, f64::min);
        prop_assert_eq!(max_drawdown(&r).unwrap(), deepest);
    }

    #[test]
    fn quantile_location_scale(p in 0.001f64..0.999, mu in -10.0f64..10.0, sigma in 0.01f64..10.0) {
        let z = inverse_normal_cdf(p, 0.0, 1.0).unwrap();
        let x = inverse_normal_cdf(p, mu, sigma).unwrap();
        prop_assert!((x - (mu + sigma * z)).abs() < 1e-9);
    }

    #[test]
    fn gains_only_never_draw_down(r in prop::collection::vec(0.0f64..0.5, 1..60)) {
        prop_assert_eq!(max_drawdown(&r).unwrap(), 0.0);
        prop_assert!(continuous_drawdowns(&r).is_empty());
    }

    #[test]
    fn continuous_runs_are_losses(r in return_series(80)) {
        let runs = continuous_drawdowns(&r);
        let losing = r.iter().filter(|&&x| x < 0.0).count();
        prop_assert!(runs.len() <= losing);
        prop_assert!(runs.iter().all(|&d| d < 0.0 && d > -1.0));
    }

    #[test]
    fn historical_var_stays_inside_sample(r in return_series(120), confidence in 0.5f64..0.99) {
        if let Ok(var) = historical_simulation_var(&r, confidence) {
            let lo = r.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = r.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(var >= lo && var <= hi);
        }
    }

    #[test]
    fn pain_never_exceeds_ulcer(r in return_series(80)) {
        let pain = pain_index(&r).unwrap();
        let ulcer = ulcer_index(&r).unwrap();
        prop_assert!(pain <= ulcer + 1e-12);
    }

    #[test]
    fn constant_series_have_zero_dispersion(c in -0.5f64..0.5, n in 4usize..200) {
        let flat = vec![c; n];
        let fund: Vec<f64> = (0..n).map(|i| i as f64 / 100.0).collect();
        prop_assert_eq!(variance_population(&flat).unwrap(), 0.0);
        prop_assert_eq!(beta(&fund, &flat).unwrap_err().kind, StatErrorKind::DivisionByZero);
        prop_assert_eq!(
            skewness_population(&flat).unwrap_err().kind,
            StatErrorKind::DivisionByZero
        );
        prop_assert_eq!(
            kurtosis_sample_excess(&flat).unwrap_err().kind,
            StatErrorKind::DivisionByZero
        );
        prop_assert_eq!(
            modified_parametric_var(&flat, 0.95).unwrap_err().kind,
            StatErrorKind::DivisionByZero
        );
    }

    #[test]
    fn gains_only_have_no_drawdown_duration(r in prop::collection::vec(0.0f64..0.5, 1..60)) {
        prop_assert_eq!(max_drawdown_duration(&r).unwrap(), 0);
    }
}
