//! Dashboard report
//!
//! Collects experiment and campaign summaries for output as JSON or plain
//! text. The text form labels every forecast as an estimate.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ForecastConfig;
use crate::experiment::{
    CampaignSummary, ExperimentKind, ExperimentStore, ExperimentSummary, MetricSummary,
};
use crate::stats::ForecastResult;

/// Snapshot of every visible experiment and campaign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    /// Time the report was computed for
    pub generated_at: DateTime<Utc>,
    /// Minimum duration used for forecasts
    pub minimum_duration_days: u32,
    /// A/B tests
    pub a_b_tests: Vec<ExperimentSummary>,
    /// Campaigns with their personalization experiences
    pub campaigns: Vec<CampaignSummary>,
}

impl Report {
    /// Build a report of running experiments and campaigns matching `query`.
    #[must_use]
    pub fn build(
        store: &ExperimentStore,
        query: &str,
        now: DateTime<Utc>,
        config: ForecastConfig,
    ) -> Self {
        Self {
            generated_at: now,
            minimum_duration_days: config.minimum_duration_days(),
            a_b_tests: store.summaries(ExperimentKind::AbTest, query, now, config),
            campaigns: store.campaign_summaries(query, now, config),
        }
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.a_b_tests.is_empty() && self.campaigns.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No running experiments found.");
        }
        if !self.a_b_tests.is_empty() {
            writeln!(f, "=== A/B Tests ({}) ===", self.a_b_tests.len())?;
            for summary in &self.a_b_tests {
                writeln!(f)?;
                write_experiment(f, summary, "")?;
            }
            writeln!(f)?;
        }
        if !self.campaigns.is_empty() {
            writeln!(f, "=== Campaigns ({}) ===", self.campaigns.len())?;
            for campaign in &self.campaigns {
                writeln!(f)?;
                write_campaign(f, campaign)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn write_campaign(f: &mut fmt::Formatter<'_>, campaign: &CampaignSummary) -> fmt::Result {
    writeln!(f, "{} [{}]", campaign.name, campaign.id)?;
    if let Some(description) = &campaign.description {
        writeln!(f, "  {description}")?;
    }
    if campaign.experiences.is_empty() {
        return writeln!(f, "  No experiences available.");
    }
    for experience in &campaign.experiences {
        write!(f, "  - ")?;
        write_experiment(f, experience, "  ")?;
    }
    Ok(())
}

fn write_experiment(
    f: &mut fmt::Formatter<'_>,
    summary: &ExperimentSummary,
    indent: &str,
) -> fmt::Result {
    writeln!(f, "{} [{}]", summary.name, summary.id)?;
    match summary.elapsed_days {
        Some(1) => writeln!(f, "{indent}  Running for 1 day")?,
        Some(days) => writeln!(f, "{indent}  Running for {days} days")?,
        None => writeln!(f, "{indent}  Start date unknown")?,
    }
    if let Some(forecast) = &summary.forecast {
        write_forecast(f, forecast, indent)?;
    }
    for metric in &summary.metrics {
        write_metric(f, metric, indent)?;
    }
    Ok(())
}

fn write_forecast(
    f: &mut fmt::Formatter<'_>,
    forecast: &ForecastResult,
    indent: &str,
) -> fmt::Result {
    if forecast.is_complete() {
        return writeln!(
            f,
            "{indent}  Estimated time remaining: ready for a decision (100% complete)"
        );
    }
    writeln!(
        f,
        "{indent}  Estimated time remaining: {} day{} ({}% complete, limited by {})",
        forecast.days_remaining,
        if forecast.days_remaining == 1 { "" } else { "s" },
        forecast.display_percent(),
        forecast.limiting_factor.label(),
    )?;
    if forecast.power_estimable {
        writeln!(
            f,
            "{indent}  Traffic rate: {:.0} visitors/day, est. remaining visitors: {}",
            forecast.samples_per_day,
            forecast.estimated_remaining_samples()
        )
    } else {
        writeln!(f, "{indent}  Traffic too low to estimate time to significance")
    }
}

fn write_metric(f: &mut fmt::Formatter<'_>, metric: &MetricSummary, indent: &str) -> fmt::Result {
    writeln!(
        f,
        "{indent}  {}: {} (p = {:.4}, {:.1}% confidence)",
        metric.name, metric.band, metric.verdict.p_value, metric.verdict.confidence_percent
    )?;
    for variation in &metric.variations {
        let name = variation.name.as_deref().unwrap_or(&variation.variation_id);
        let role = if variation.is_baseline { " (baseline)" } else { "" };
        let rate = variation
            .conversion_rate
            .map_or_else(|| "-".to_string(), |r| format!("{:.2}%", r * 100.0));
        write!(
            f,
            "{indent}    {name}{role}: {} samples, {} conversions, {rate}",
            variation.samples, variation.conversions
        )?;
        if let Some(lift) = &variation.lift {
            write!(
                f,
                ", lift {:+.2}% {}",
                lift.value * 100.0,
                lift.significance_label()
            )?;
            if lift.significance > 0.0 {
                write!(f, " ({:.1}% confidence)", lift.significance)?;
            }
        }
        writeln!(f)?;
    }
    Ok(())
}
