//! Remaining-duration forecast
//!
//! A heuristic, not a power calculation. Days remaining are the later of
//! two goals:
//!
//! - the configured minimum run length, and
//! - the extra traffic the current p-value suggests is needed to reach
//!   [`SIGNIFICANT_P`](super::SIGNIFICANT_P), at the observed run rate.
//!
//! Anything rendered from a [`ForecastResult`] should be labelled as an
//! estimate. It must not gate automated decisions.

use serde::{Deserialize, Serialize};

use super::{evaluate_significance, SIGNIFICANT_P};
use crate::experiment::{ExperimentTiming, MetricResults};

/// Normalises `1 - p` so reaching `p = 0.15` counts as full power progress.
const POWER_PROGRESS_SPAN: f64 = 0.85;

/// Highest completion reported while an experiment is still running.
const MAX_RUNNING_PERCENT: f64 = 99.0;

/// Which goal determines the remaining days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitingFactor {
    /// Waiting for the minimum run length.
    MinimumDuration,
    /// Waiting for enough traffic to reach significance.
    StatisticalPower,
}

impl LimitingFactor {
    /// Human-readable description.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MinimumDuration => "minimum duration",
            Self::StatisticalPower => "statistical power",
        }
    }
}

/// Estimated time to a decision point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ForecastResult {
    /// Estimated whole days remaining
    pub days_remaining: u32,
    /// Progress in `[0, 99]`
    pub completion_percent: u8,
    /// Goal that binds later
    pub limiting_factor: LimitingFactor,
    /// Observed run rate
    pub samples_per_day: f64,
    /// Exposed units so far, across all variations
    pub total_samples: u64,
    /// p-value the estimate was based on
    pub current_p_value: f64,
    /// `false` when the run rate was zero and only the minimum-duration
    /// figure is meaningful
    pub power_estimable: bool,
}

impl ForecastResult {
    /// Whether both goals are met.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.days_remaining == 0
            && self.limiting_factor == LimitingFactor::MinimumDuration
            && self.current_p_value <= SIGNIFICANT_P
    }

    /// Percentage to display: 100 once complete, otherwise
    /// [`completion_percent`](Self::completion_percent).
    #[must_use]
    pub fn display_percent(&self) -> u8 {
        if self.is_complete() {
            100
        } else {
            self.completion_percent
        }
    }

    /// Visitors still expected before the decision point.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn estimated_remaining_samples(&self) -> u64 {
        (self.samples_per_day * f64::from(self.days_remaining)).round() as u64
    }
}

/// Estimate days remaining for an experiment.
///
/// Returns `None` when the start date is unknown, no whole day has elapsed
/// yet, or `results` holds fewer than two variations.
///
/// ```rust
/// use chrono::Utc;
/// use splitstat::config::ForecastConfig;
/// use splitstat::experiment::{ExperimentTiming, MetricResults, VariationResult};
/// use splitstat::stats::{estimate_time_remaining, LimitingFactor};
///
/// let results = MetricResults::new()
///     .with("control", VariationResult::baseline(1000, 100))
///     .with("treatment", VariationResult::treatment(1000, 150));
/// let timing = ExperimentTiming::new(Some(Utc::now()), 7, ForecastConfig::default());
///
/// let forecast = estimate_time_remaining(&timing, &results).unwrap();
/// assert_eq!(forecast.days_remaining, 7);
/// assert_eq!(forecast.limiting_factor, LimitingFactor::MinimumDuration);
/// assert_eq!(forecast.completion_percent, 50);
/// ```
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn estimate_time_remaining(
    timing: &ExperimentTiming,
    results: &MetricResults,
) -> Option<ForecastResult> {
    timing.start_date()?;
    let elapsed_days = timing.elapsed_days();
    if elapsed_days == 0 || results.len() < 2 {
        return None;
    }

    let minimum_days = timing.minimum_duration_days();
    let total_samples = results.total_samples();
    let samples_per_day = total_samples as f64 / f64::from(elapsed_days);
    let current_p_value = evaluate_significance(results, SIGNIFICANT_P).p_value;

    let minimum_days_remaining = minimum_days.saturating_sub(elapsed_days);
    let power_days = power_days_remaining(current_p_value, total_samples, samples_per_day);
    let power_estimable = power_days.is_some();
    let power_days_remaining = power_days.unwrap_or(0);

    let (limiting_factor, days_remaining) = if minimum_days_remaining >= power_days_remaining {
        (LimitingFactor::MinimumDuration, minimum_days_remaining)
    } else {
        (LimitingFactor::StatisticalPower, power_days_remaining)
    };

    let duration_ratio = if minimum_days == 0 {
        1.0
    } else {
        f64::from(elapsed_days) / f64::from(minimum_days)
    };
    let completion = match limiting_factor {
        LimitingFactor::MinimumDuration => duration_ratio * 100.0,
        LimitingFactor::StatisticalPower => {
            let duration_progress = duration_ratio.min(1.0) * 0.5;
            let power_progress =
                ((1.0 - current_p_value) / POWER_PROGRESS_SPAN).clamp(0.0, 1.0) * 0.5;
            (duration_progress + power_progress) * 100.0
        }
    };
    let completion_percent = completion.round().clamp(0.0, MAX_RUNNING_PERCENT) as u8;

    tracing::debug!(
        elapsed_days,
        total_samples,
        current_p_value,
        minimum_days_remaining,
        power_days_remaining,
        ?limiting_factor,
        "estimated time remaining"
    );

    Some(ForecastResult {
        days_remaining,
        completion_percent,
        limiting_factor,
        samples_per_day,
        total_samples,
        current_p_value,
        power_estimable,
    })
}

/// Days until the traffic-based estimate reaches the significance cutoff.
///
/// `Some(0)` once the p-value is at or below the cutoff; `None` when the run
/// rate cannot support an estimate.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn power_days_remaining(p_value: f64, total_samples: u64, samples_per_day: f64) -> Option<u32> {
    if p_value <= SIGNIFICANT_P {
        return Some(0);
    }
    if !samples_per_day.is_finite() || samples_per_day <= 0.0 {
        tracing::debug!("zero run rate, power estimate unavailable");
        return None;
    }

    let p_value_ratio = p_value / SIGNIFICANT_P;
    let additional_samples = (total_samples as f64 * (p_value_ratio - 1.0) * 0.5).ceil();
    let days = (additional_samples / samples_per_day).ceil();
    days.is_finite().then(|| days as u32)
}
