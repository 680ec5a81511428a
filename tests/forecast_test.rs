//! Duration forecaster tests

use chrono::{Duration, TimeZone, Utc};
use splitstat::config::ForecastConfig;
use splitstat::experiment::{Experiment, ExperimentTiming, Metric, MetricResults, VariationResult};
use splitstat::stats::{estimate_time_remaining, LimitingFactor};

fn timing(elapsed_days: u32, minimum_days: u32) -> ExperimentTiming {
    let config = ForecastConfig::new(minimum_days).expect("valid minimum duration");
    ExperimentTiming::new(Some(Utc::now()), elapsed_days, config)
}

fn results(n1: u64, x1: u64, n2: u64, x2: u64) -> MetricResults {
    MetricResults::new()
        .with("1", VariationResult::baseline(n1, x1))
        .with("2", VariationResult::treatment(n2, x2))
}

#[test]
fn test_absent_without_start_date() {
    let timing = ExperimentTiming::new(None, 30, ForecastConfig::default());
    assert!(estimate_time_remaining(&timing, &results(1000, 100, 1000, 150)).is_none());
}

#[test]
fn test_absent_on_first_day() {
    assert!(estimate_time_remaining(&timing(0, 14), &results(10, 1, 10, 2)).is_none());
}

#[test]
fn test_absent_without_results() {
    assert!(estimate_time_remaining(&timing(5, 14), &MetricResults::new()).is_none());
}

#[test]
fn test_significant_and_past_minimum_needs_no_more_days() {
    let data = results(1000, 100, 1000, 150);
    let forecast = estimate_time_remaining(&timing(21, 14), &data).unwrap();
    assert_eq!(forecast.days_remaining, 0);
    assert!(forecast.is_complete());
    assert_eq!(forecast.display_percent(), 100);
    assert!(forecast.completion_percent <= 99);
}

#[test]
fn test_significant_but_short_waits_for_minimum() {
    let forecast = estimate_time_remaining(&timing(3, 14), &results(1000, 100, 1000, 150)).unwrap();
    assert_eq!(forecast.limiting_factor, LimitingFactor::MinimumDuration);
    assert_eq!(forecast.days_remaining, 11);
    // round(3 / 14 * 100) = 21
    assert_eq!(forecast.completion_percent, 21);
    assert!(!forecast.is_complete());
}

#[test]
fn test_custom_minimum_duration_threads_through() {
    let data = results(1000, 100, 1000, 150);
    let short = estimate_time_remaining(&timing(5, 7), &data).unwrap();
    let long = estimate_time_remaining(&timing(5, 30), &data).unwrap();
    assert_eq!(short.days_remaining, 2);
    assert_eq!(long.days_remaining, 25);
}

#[test]
fn test_power_limited_forecast() {
    // 10% vs 10.5%, 2000 samples over 20 days, p ≈ 0.712
    // ratio ≈ 4.75, additional = ceil(2000 * 3.75 * 0.5) = 3749 (approx), 100/day
    let data = results(1000, 100, 1000, 105);
    let forecast = estimate_time_remaining(&timing(20, 14), &data).unwrap();
    assert_eq!(forecast.limiting_factor, LimitingFactor::StatisticalPower);
    assert!(forecast.days_remaining >= 36 && forecast.days_remaining <= 39);
    assert_eq!(forecast.total_samples, 2000);
    assert!((forecast.samples_per_day - 100.0).abs() < 1e-9);
    // duration half complete, power progress (1 - 0.712) / 0.85 * 0.5 ≈ 0.17 => 67%
    assert!(forecast.completion_percent >= 66 && forecast.completion_percent <= 68);
}

#[test]
fn test_completion_capped_below_hundred() {
    let data = results(1000, 100, 1000, 105);
    let forecast = estimate_time_remaining(&timing(90, 14), &data).unwrap();
    assert!(forecast.completion_percent <= 99);
}

#[test]
fn test_experiment_forecast_from_payload_dates() {
    let start = Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap();
    let experiment = Experiment::builder("1", "Pricing")
        .earliest(start)
        .metric(Metric::new("Upgrades", results(1000, 100, 1000, 150)))
        .build();

    let config = ForecastConfig::new(10).unwrap();
    let now = start + Duration::days(4) + Duration::hours(20);
    let forecast = experiment.forecast(now, config).unwrap();
    assert_eq!(forecast.days_remaining, 6);
    assert!((forecast.samples_per_day - 500.0).abs() < 1e-9);
}

#[test]
fn test_huge_sample_counts_do_not_overflow() {
    let data = results(u64::MAX, 0, u64::MAX, 0);
    let forecast = estimate_time_remaining(&timing(10, 14), &data).unwrap();
    assert_eq!(forecast.total_samples, u64::MAX);
    assert_eq!(forecast.limiting_factor, LimitingFactor::StatisticalPower);
    assert_eq!(forecast.days_remaining, 29);
    assert_eq!(forecast.completion_percent, 36);
}
