//! Statistics engine benchmarks
//!
//! Every visible dashboard card re-evaluates on each refresh, so these
//! should stay in the nanosecond range.
//!
//! Run with: cargo bench --bench significance

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use splitstat::config::ForecastConfig;
use splitstat::experiment::{ExperimentTiming, MetricResults, VariationResult};
use splitstat::stats::{estimate_time_remaining, evaluate_significance, normal_cdf, SIGNIFICANT_P};

fn results(arms: u64) -> MetricResults {
    let mut results = MetricResults::new().with("0", VariationResult::baseline(10_000, 1_000));
    for arm in 1..arms {
        results.insert(arm.to_string(), VariationResult::treatment(10_000, 1_000 + arm * 15));
    }
    results
}

fn bench_normal_cdf(c: &mut Criterion) {
    c.bench_function("normal_cdf", |b| b.iter(|| normal_cdf(black_box(1.96))));
}

fn bench_significance(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_significance");
    for arms in [2, 10] {
        let data = results(arms);
        group.bench_with_input(BenchmarkId::new("arms", arms), &data, |b, data| {
            b.iter(|| evaluate_significance(black_box(data), SIGNIFICANT_P));
        });
    }
    group.finish();
}

fn bench_forecast(c: &mut Criterion) {
    let timing = ExperimentTiming::new(Some(Utc::now()), 9, ForecastConfig::default());
    let data = results(2);
    c.bench_function("estimate_time_remaining", |b| {
        b.iter(|| estimate_time_remaining(black_box(&timing), black_box(&data)));
    });
}

criterion_group!(benches, bench_normal_cdf, bench_significance, bench_forecast);
criterion_main!(benches);
