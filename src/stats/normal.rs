//! Standard normal CDF (Abramowitz–Stegun 26.2.17)

/// Standard normal cumulative distribution function.
///
/// Rational polynomial approximation with absolute error below `7.5e-8`.
/// The formula is kept as-is so p-values stay comparable with previously
/// reported numbers; do not swap in a library CDF.
///
/// ```rust
/// use splitstat::stats::normal_cdf;
///
/// assert!((normal_cdf(0.0) - 0.5).abs() < 1e-6);
/// assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4);
/// ```
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.231_641_9 * x.abs());
    let d = 0.398_942_3 * (-x * x / 2.0).exp();
    let prob = d
        * t
        * (0.319_381_5
            + t * (-0.356_563_8 + t * (1.781_478 + t * (-1.821_256 + t * 1.330_274))));
    if x > 0.0 {
        1.0 - prob
    } else {
        prob
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_points() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-6);
        assert!((normal_cdf(1.96) - 0.9750).abs() < 1e-4);
        assert!((normal_cdf(-1.96) - 0.0250).abs() < 1e-4);
        assert!((normal_cdf(1.0) - 0.841_344_7).abs() < 1e-6);
    }

    #[test]
    fn test_symmetry() {
        for x in [0.1, 0.5, 1.3, 2.7, 4.0] {
            assert!((normal_cdf(x) + normal_cdf(-x) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_tails() {
        assert!(normal_cdf(10.0) > 0.999_999);
        assert!(normal_cdf(-10.0) < 1e-6);
        assert!(normal_cdf(-10.0) >= 0.0);
    }
}
