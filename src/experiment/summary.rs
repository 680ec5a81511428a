//! Experiment Summary - everything a dashboard card shows, computed once

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Campaign, Experiment, Lift, Metric};
use crate::config::ForecastConfig;
use crate::stats::{ForecastResult, SignificanceBand, SignificanceVerdict, SIGNIFICANT_P};

/// Per-variation row of a metric table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariationSummary {
    /// Variation id
    pub variation_id: String,
    /// Display name, from the result or the experiment's variation list
    pub name: Option<String>,
    /// Whether this is the control arm
    pub is_baseline: bool,
    /// Exposed units
    pub samples: u64,
    /// Converted units
    pub conversions: u64,
    /// Conversion rate, `None` without samples
    pub conversion_rate: Option<f64>,
    /// Platform lift, unmodified
    pub lift: Option<Lift>,
}

/// Significance of one metric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSummary {
    /// Metric name
    pub name: String,
    /// Verdict at the dashboard cutoff (`p < 0.15`)
    pub verdict: SignificanceVerdict,
    /// Display band of the p-value
    pub band: SignificanceBand,
    /// Per-variation rows
    pub variations: Vec<VariationSummary>,
}

impl MetricSummary {
    fn new(metric: &Metric, experiment: &Experiment) -> Self {
        let verdict = metric.significance(SIGNIFICANT_P);
        let variations = metric
            .results()
            .into_iter()
            .flat_map(|results| results.iter())
            .map(|(variation_id, result)| VariationSummary {
                variation_id: variation_id.to_string(),
                name: result
                    .name()
                    .map(str::to_string)
                    .or_else(|| variation_name(experiment, variation_id)),
                is_baseline: result.is_baseline(),
                samples: result.sample_count(),
                conversions: result.conversion_count(),
                conversion_rate: result.conversion_rate(),
                lift: result.lift().cloned(),
            })
            .collect();

        Self {
            name: metric.name().to_string(),
            verdict,
            band: verdict.band(),
            variations,
        }
    }
}

fn variation_name(experiment: &Experiment, variation_id: &str) -> Option<String> {
    experiment
        .variations()
        .iter()
        .find(|v| v.variation_id.as_deref() == Some(variation_id))
        .map(|v| v.name.clone())
}

/// Summary of one experiment at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentSummary {
    /// Experiment id
    pub id: String,
    /// Experiment name
    pub name: String,
    /// Whole days since the start date, `None` without one
    pub elapsed_days: Option<u32>,
    /// Estimated time remaining
    pub forecast: Option<ForecastResult>,
    /// One entry per metric
    pub metrics: Vec<MetricSummary>,
}

impl ExperimentSummary {
    /// Summarise `experiment` as of `now`.
    #[must_use]
    pub fn new(experiment: &Experiment, now: DateTime<Utc>, config: ForecastConfig) -> Self {
        let timing = experiment.timing(now, config);
        Self {
            id: experiment.id().to_string(),
            name: experiment.name().to_string(),
            elapsed_days: timing.start_date().map(|_| timing.elapsed_days()),
            forecast: experiment.forecast(now, config),
            metrics: experiment
                .metrics()
                .iter()
                .map(|metric| MetricSummary::new(metric, experiment))
                .collect(),
        }
    }
}

/// Summary of a campaign and its running experiences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignSummary {
    /// Campaign id
    pub id: String,
    /// Campaign name
    pub name: String,
    /// Campaign description
    pub description: Option<String>,
    /// One entry per running experience, in platform order
    pub experiences: Vec<ExperimentSummary>,
}

impl CampaignSummary {
    /// Summarise `campaign` with its `experiences` as of `now`.
    #[must_use]
    pub fn new<'a>(
        campaign: &Campaign,
        experiences: impl IntoIterator<Item = &'a Experiment>,
        now: DateTime<Utc>,
        config: ForecastConfig,
    ) -> Self {
        Self {
            id: campaign.id().to_string(),
            name: campaign.name().to_string(),
            description: campaign.description().map(str::to_string),
            experiences: experiences
                .into_iter()
                .map(|experience| ExperimentSummary::new(experience, now, config))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{MetricResults, VariationResult};
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_summary_names_and_verdicts() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let results = MetricResults::new()
            .with("1", VariationResult::baseline(1000, 100))
            .with("2", VariationResult::treatment(1000, 150).with_name("Bold CTA"));
        let experiment = Experiment::builder("e", "Buttons")
            .earliest(start)
            .variation("1", "Original")
            .metric(Metric::new("Clicks", results))
            .build();

        let now = start + Duration::days(3);
        let summary = ExperimentSummary::new(&experiment, now, ForecastConfig::default());
        assert_eq!(summary.elapsed_days, Some(3));
        assert!(summary.forecast.is_some());

        let metric = &summary.metrics[0];
        assert_eq!(metric.band, SignificanceBand::HighlySignificant);
        assert_eq!(metric.variations[0].name.as_deref(), Some("Original"));
        assert_eq!(metric.variations[1].name.as_deref(), Some("Bold CTA"));
    }

    #[test]
    fn test_summary_without_start() {
        let experiment = Experiment::builder("e", "No data")
            .metric(Metric::pending("m"))
            .build();
        let summary = ExperimentSummary::new(&experiment, Utc::now(), ForecastConfig::default());
        assert_eq!(summary.elapsed_days, None);
        assert!(summary.forecast.is_none());
        assert_eq!(summary.metrics[0].verdict, SignificanceVerdict::NEUTRAL);
        assert!(summary.metrics[0].variations.is_empty());
    }

    #[test]
    fn test_campaign_summary() {
        let campaign = Campaign::new("9", "Returning Visitors").with_description("Repeat visits");
        let experiences = [
            Experiment::new("a", "Hero banner"),
            Experiment::new("b", "Loyalty offer"),
        ];
        let summary =
            CampaignSummary::new(&campaign, &experiences, Utc::now(), ForecastConfig::default());
        assert_eq!(summary.description.as_deref(), Some("Repeat visits"));
        let names: Vec<&str> = summary.experiences.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Hero banner", "Loyalty offer"]);
    }
}
