//! Experiment - a running A/B test or personalization campaign

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{ExperimentTiming, Metric};
use crate::config::ForecastConfig;
use crate::stats::{estimate_time_remaining, ForecastResult};

/// Variation definition as listed on the experiment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariationInfo {
    /// Platform variation id
    #[serde(default, deserialize_with = "de_opt_id")]
    pub variation_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: String,
}

/// Experiment represents one experiment as fetched from the platform.
///
/// Only the fields the statistics engine and the search filter need are
/// modelled; everything else in the upstream payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experiment {
    #[serde(deserialize_with = "de_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    earliest: Option<DateTime<Utc>>,
    #[serde(default)]
    metrics: Vec<Metric>,
    #[serde(default)]
    variations: Vec<VariationInfo>,
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    campaign_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id", skip_serializing_if = "Option::is_none")]
    experience_id: Option<String>,
}

/// Platform ids are numeric; tests and fixtures often use strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

pub(super) fn de_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

pub(super) fn de_opt_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

impl Experiment {
    /// Create an experiment with no metrics.
    ///
    /// # Arguments
    ///
    /// * `id` - Platform experiment id
    /// * `name` - Human-readable name
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            status: None,
            earliest: None,
            metrics: Vec::new(),
            variations: Vec::new(),
            campaign_id: None,
            experience_id: None,
        }
    }

    /// Create a builder for constructing an experiment with optional fields.
    #[must_use]
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> ExperimentBuilder {
        ExperimentBuilder::new(id, name)
    }

    /// Get the experiment id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the platform status (`running`, `paused`, ...), if reported.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Get the time the experiment first received traffic.
    #[must_use]
    pub const fn earliest(&self) -> Option<DateTime<Utc>> {
        self.earliest
    }

    /// Get the metrics.
    #[must_use]
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Get the variation definitions.
    #[must_use]
    pub fn variations(&self) -> &[VariationInfo] {
        &self.variations
    }

    /// Get the campaign this personalization experience belongs to.
    #[must_use]
    pub fn campaign_id(&self) -> Option<&str> {
        self.campaign_id.as_deref()
    }

    /// Get the personalization experience id.
    #[must_use]
    pub fn experience_id(&self) -> Option<&str> {
        self.experience_id.as_deref()
    }

    /// The first metric, which drives the forecast.
    #[must_use]
    pub fn primary_metric(&self) -> Option<&Metric> {
        self.metrics.first()
    }

    /// Whether the platform reports the experiment as `running`.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status.as_deref() == Some("running")
    }

    /// Timing relative to `now`.
    #[must_use]
    pub fn timing(&self, now: DateTime<Utc>, config: ForecastConfig) -> ExperimentTiming {
        ExperimentTiming::since(self.earliest, now, config)
    }

    /// Estimate time remaining from the primary metric.
    ///
    /// `None` when the start date is unknown, no metric has results yet, or
    /// less than a day has elapsed.
    #[must_use]
    pub fn forecast(&self, now: DateTime<Utc>, config: ForecastConfig) -> Option<ForecastResult> {
        let results = self.primary_metric()?.results()?;
        estimate_time_remaining(&self.timing(now, config), results)
    }

    /// Case-insensitive search over name, description, metric names and
    /// variation names. An empty query matches everything.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let hit = |text: &str| text.to_lowercase().contains(&query);

        hit(&self.name)
            || self.description.as_deref().is_some_and(hit)
            || self.metrics.iter().any(|metric| hit(metric.name()))
            || self.variations.iter().any(|variation| hit(&variation.name))
    }
}

/// Builder for `Experiment`.
#[derive(Debug)]
pub struct ExperimentBuilder {
    experiment: Experiment,
}

impl ExperimentBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            experiment: Experiment::new(id, name),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.experiment.description = Some(description.into());
        self
    }

    /// Set the platform status.
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.experiment.status = Some(status.into());
        self
    }

    /// Set the start timestamp.
    #[must_use]
    pub const fn earliest(mut self, earliest: DateTime<Utc>) -> Self {
        self.experiment.earliest = Some(earliest);
        self
    }

    /// Attach the experiment to a campaign as one of its experiences.
    #[must_use]
    pub fn experience(
        mut self,
        campaign_id: impl Into<String>,
        experience_id: impl Into<String>,
    ) -> Self {
        self.experiment.campaign_id = Some(campaign_id.into());
        self.experiment.experience_id = Some(experience_id.into());
        self
    }

    /// Append a metric.
    #[must_use]
    pub fn metric(mut self, metric: Metric) -> Self {
        self.experiment.metrics.push(metric);
        self
    }

    /// Append a variation definition.
    #[must_use]
    pub fn variation(mut self, variation_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.experiment.variations.push(VariationInfo {
            variation_id: Some(variation_id.into()),
            name: name.into(),
        });
        self
    }

    /// Build the `Experiment`.
    #[must_use]
    pub fn build(self) -> Experiment {
        self.experiment
    }
}
