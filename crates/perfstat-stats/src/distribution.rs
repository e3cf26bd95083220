//! Normal distribution helpers.
//!
//! The quantile function is Wichura's AS241 (`PPND16`), accurate to about
//! 1 part in 10^16 over the whole open interval.

#![allow(clippy::excessive_precision)]

use perfstat_common::StatError;

/// Central region, `|p - 0.5| <= 0.425`, polynomials in `r = 0.180625 - q^2`.
const A: [f64; 8] = [
    3.387_132_872_796_366_608,
    133.141_667_891_784_377_450,
    1_971.590_950_306_551_442_700,
    13_731.693_765_509_461_125_000,
    45_921.953_931_549_871_457_000,
    67_265.770_927_008_700_853_000,
    33_430.575_583_588_128_105_000,
    2_509.080_928_730_122_672_700,
];
const B: [f64; 8] = [
    1.0,
    42.313_330_701_600_911_252,
    687.187_007_492_057_908_300,
    5_394.196_021_424_751_107_700,
    21_213.794_301_586_595_867_000,
    39_307.895_800_092_710_610_000,
    28_729.085_735_721_942_674_000,
    5_226.495_278_852_854_561_000,
];

/// Intermediate tail, `r = sqrt(-ln(min(p, 1-p))) <= 5`, shifted by 1.6.
const C: [f64; 8] = [
    1.423_437_110_749_683_577_340,
    4.630_337_846_156_545_295_900,
    5.769_497_221_460_691_405_500,
    3.647_848_324_763_204_605_040,
    1.270_458_252_452_368_382_580,
    2.417_807_251_774_506_117_700e-1,
    2.272_384_498_926_918_458_330e-2,
    7.745_450_142_783_414_076_400e-4,
];
const D: [f64; 8] = [
    1.0,
    2.053_191_626_637_758_821_870,
    1.676_384_830_183_803_849_400,
    6.897_673_349_851_000_045_500e-1,
    1.481_039_764_274_800_745_900e-1,
    1.519_866_656_361_645_719_660e-2,
    5.475_938_084_995_344_946_000e-4,
    1.050_750_071_644_416_843_240e-9,
];

/// Far tail, `r > 5`, shifted by 5.
const E: [f64; 8] = [
    6.657_904_643_501_103_777_200,
    5.463_784_911_164_114_369_900,
    1.784_826_539_917_291_335_800,
    2.965_605_718_285_048_912_300e-1,
    2.653_218_952_657_612_309_300e-2,
    1.242_660_947_388_078_438_600e-3,
    2.711_555_568_743_487_578_150e-5,
    2.010_334_399_292_288_132_650e-7,
];
const F: [f64; 8] = [
    1.0,
    5.998_322_065_558_879_376_900e-1,
    1.369_298_809_227_358_053_100e-1,
    1.487_536_129_085_061_485_250e-2,
    7.868_691_311_456_132_591_000e-4,
    1.846_318_317_510_054_681_800e-5,
    1.421_511_758_316_445_888_700e-7,
    2.044_263_103_389_939_785_640e-15,
];

const SPLIT_CENTRAL: f64 = 0.425;
const SPLIT_TAIL: f64 = 5.0;
const CONST_CENTRAL: f64 = 0.180_625;
const CONST_TAIL: f64 = 1.6;

/// Horner evaluation, coefficients in ascending order.
#[inline]
fn poly(coef: &[f64; 8], x: f64) -> f64 {
    coef.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Standard normal quantile for `p` in (0, 1).
fn std_norm_inv(p: f64) -> f64 {
    let q = p - 0.5;
    if q.abs() <= SPLIT_CENTRAL {
        let r = CONST_CENTRAL - q * q;
        return q * poly(&A, r) / poly(&B, r);
    }

    let tail = if q < 0.0 { p } else { 1.0 - p };
    let mut r = (-tail.ln()).sqrt();
    let val = if r <= SPLIT_TAIL {
        r -= CONST_TAIL;
        poly(&C, r) / poly(&D, r)
    } else {
        r -= SPLIT_TAIL;
        poly(&E, r) / poly(&F, r)
    };
    if q < 0.0 { -val } else { val }
}

/// Returns `x` such that `Φ((x - mu) / sigma) = p`.
///
/// # Errors
/// - `InvalidParameter` when `p` is not strictly inside (0, 1) or `sigma` is
///   not strictly positive.
pub fn inverse_normal_cdf(p: f64, mu: f64, sigma: f64) -> Result<f64, StatError> {
    if !(p > 0.0 && p < 1.0) {
        return Err(StatError::invalid_parameter(format!(
            "probability must lie strictly between 0 and 1, got {p}"
        )));
    }
    if !(sigma > 0.0 && sigma.is_finite()) {
        return Err(StatError::invalid_parameter(format!(
            "standard deviation must be positive, got {sigma}"
        )));
    }
    Ok(mu + sigma * std_norm_inv(p))
}

/// Standard normal density.
pub fn normal_pdf(z: f64) -> f64 {
    let inv_sqrt_2pi = 1.0 / (2.0 * std::f64::consts::PI).sqrt();
    inv_sqrt_2pi * (-0.5 * z * z).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfstat_common::StatErrorKind;

    fn rel_close(got: f64, want: f64) -> bool {
        ((got - want) / want).abs() < 1e-14
    }

    #[test]
    fn median_is_exact_zero() {
        assert_eq!(inverse_normal_cdf(0.5, 0.0, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn reference_quantiles() {
        let cases = [
            (0.975, 1.959963984540054),
            (0.95, 1.6448536269514722),
            (0.05, -1.6448536269514722),
            (0.01, -2.3263478740408408),
            (0.10, -1.2815515655446004),
            (0.25, -0.6744897501960817),
            (1e-10, -6.361340902404056),
        ];
        for (p, want) in cases {
            let got = inverse_normal_cdf(p, 0.0, 1.0).unwrap();
            assert!(rel_close(got, want), "p={p}: got {got}, want {want}");
        }
    }

    #[test]
    fn branches_are_antisymmetric() {
        for p in [0.3, 0.07, 0.001, 1e-6] {
            let lo = inverse_normal_cdf(p, 0.0, 1.0).unwrap();
            let hi = inverse_normal_cdf(1.0 - p, 0.0, 1.0).unwrap();
            assert!((lo + hi).abs() < 1e-9 * lo.abs().max(1.0), "p={p}");
        }
    }

    #[test]
    fn location_scale() {
        let z = inverse_normal_cdf(0.05, 0.0, 1.0).unwrap();
        let x = inverse_normal_cdf(0.05, 0.01, 0.05).unwrap();
        assert!((x - (0.01 + 0.05 * z)).abs() < 1e-15);
    }

    #[test]
    fn rejects_bad_probability() {
        for p in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert_eq!(
                inverse_normal_cdf(p, 0.0, 1.0).unwrap_err().kind,
                StatErrorKind::InvalidParameter
            );
        }
        assert_eq!(
            inverse_normal_cdf(0.5, 0.0, 0.0).unwrap_err().kind,
            StatErrorKind::InvalidParameter
        );
    }

    #[test]
    fn pdf_peak() {
        assert!((normal_pdf(0.0) - 0.3989422804014327).abs() < 1e-15);
    }
}
