//! Two-proportion z-test on a baseline and one treatment arm

use serde::{Deserialize, Serialize};

use super::normal_cdf;
use crate::experiment::{MetricResults, VariationResult};

/// p-value at or below which a result is "Highly Significant".
pub const HIGHLY_SIGNIFICANT_P: f64 = 0.05;

/// p-value at or below which a result is "Significant".
///
/// More lenient than the conventional 0.05; this is the dashboard's primary
/// cutoff and the target the duration forecaster works towards.
pub const SIGNIFICANT_P: f64 = 0.15;

/// Outcome of a significance test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SignificanceVerdict {
    /// `p_value < threshold`
    pub is_significant: bool,
    /// Two-tailed p-value in `[0, 1]`
    pub p_value: f64,
    /// `(1 - p_value) * 100`
    pub confidence_percent: f64,
    /// Absolute z-statistic (0 for the neutral verdict)
    pub z_score: f64,
}

impl SignificanceVerdict {
    /// Verdict returned whenever the input cannot be tested.
    pub const NEUTRAL: Self = Self {
        is_significant: false,
        p_value: 1.0,
        confidence_percent: 0.0,
        z_score: 0.0,
    };

    /// Build a verdict from a z-statistic.
    fn from_z(z: f64, threshold: f64) -> Self {
        let p_value = (2.0 * (1.0 - normal_cdf(z))).clamp(0.0, 1.0);
        Self {
            is_significant: p_value < threshold,
            p_value,
            confidence_percent: (1.0 - p_value) * 100.0,
            z_score: z,
        }
    }

    /// Band this verdict's p-value.
    #[must_use]
    pub fn band(&self) -> SignificanceBand {
        SignificanceBand::from_p_value(self.p_value)
    }
}

impl Default for SignificanceVerdict {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Display banding of a p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignificanceBand {
    /// `p <= 0.05`
    HighlySignificant,
    /// `0.05 < p <= 0.15`
    Significant,
    /// `p > 0.15`
    NotSignificant,
}

impl SignificanceBand {
    /// Band a p-value.
    #[must_use]
    pub fn from_p_value(p_value: f64) -> Self {
        if p_value <= HIGHLY_SIGNIFICANT_P {
            Self::HighlySignificant
        } else if p_value <= SIGNIFICANT_P {
            Self::Significant
        } else {
            Self::NotSignificant
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighlySignificant => "Highly Significant",
            Self::Significant => "Significant",
            Self::NotSignificant => "Not Significant",
        }
    }
}

impl std::fmt::Display for SignificanceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Test whether a metric's treatment differs from its baseline.
///
/// Compares the first baseline and the first non-baseline variation in
/// iteration order. Any input that cannot be tested (fewer than two arms, a
/// missing baseline or treatment, an empty arm, zero variance) yields
/// [`SignificanceVerdict::NEUTRAL`].
///
/// # Example
///
/// ```rust
/// use splitstat::experiment::{MetricResults, VariationResult};
/// use splitstat::stats::evaluate_significance;
///
/// let results = MetricResults::new()
///     .with("control", VariationResult::baseline(1000, 100))
///     .with("treatment", VariationResult::treatment(1000, 150));
///
/// let verdict = evaluate_significance(&results, 0.05);
/// assert!(verdict.is_significant);
/// assert!(verdict.p_value < 0.001);
/// ```
#[must_use]
pub fn evaluate_significance(results: &MetricResults, threshold: f64) -> SignificanceVerdict {
    if results.len() < 2 {
        return SignificanceVerdict::NEUTRAL;
    }

    let baseline = results.values().find(|v| v.is_baseline());
    let treatment = results.values().find(|v| !v.is_baseline());
    let (Some(baseline), Some(treatment)) = (baseline, treatment) else {
        return SignificanceVerdict::NEUTRAL;
    };

    if results.len() > 2 {
        tracing::debug!(
            variations = results.len(),
            "more than two variations, comparing baseline against the first treatment only"
        );
    }

    z_statistic(baseline, treatment)
        .map_or(SignificanceVerdict::NEUTRAL, |z| SignificanceVerdict::from_z(z, threshold))
}

/// Pooled-variance z-statistic, or `None` when it is undefined.
#[allow(clippy::cast_precision_loss)]
fn z_statistic(baseline: &VariationResult, treatment: &VariationResult) -> Option<f64> {
    let (n1, n2) = (baseline.sample_count(), treatment.sample_count());
    if n1 == 0 || n2 == 0 {
        return None;
    }
    let (n1, n2) = (n1 as f64, n2 as f64);
    let (x1, x2) = (
        baseline.conversion_count() as f64,
        treatment.conversion_count() as f64,
    );

    let p1 = x1 / n1;
    let p2 = x2 / n2;
    let pooled = (x1 + x2) / (n1 + n2);
    let standard_error = (pooled * (1.0 - pooled) * (1.0 / n1 + 1.0 / n2)).sqrt();

    // Both arms all-converted or all-unconverted
    if !standard_error.is_finite() || standard_error <= 0.0 {
        return Some(0.0);
    }

    let z = (p1 - p2).abs() / standard_error;
    z.is_finite().then_some(z)
}
