//! Metric - one tracked goal and its per-variation results

use serde::{Deserialize, Serialize};

use super::MetricResults;
use crate::stats::{evaluate_significance, SignificanceVerdict};

/// Metric represents one goal measured across an experiment's variations.
///
/// The platform omits `results` for metrics that have not collected data
/// yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metric {
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    results: Option<MetricResults>,
}

impl Metric {
    /// Create a metric with results.
    #[must_use]
    pub fn new(name: impl Into<String>, results: MetricResults) -> Self {
        Self {
            name: name.into(),
            results: Some(results),
        }
    }

    /// Create a metric that has not reported results yet.
    #[must_use]
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: None,
        }
    }

    /// Get the metric name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the per-variation results, if reported.
    #[must_use]
    pub const fn results(&self) -> Option<&MetricResults> {
        self.results.as_ref()
    }

    /// Test this metric at `threshold`; neutral without results.
    #[must_use]
    pub fn significance(&self, threshold: f64) -> SignificanceVerdict {
        self.results
            .as_ref()
            .map_or(SignificanceVerdict::NEUTRAL, |results| {
                evaluate_significance(results, threshold)
            })
    }
}
