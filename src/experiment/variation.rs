//! Variation Result - one treatment arm's outcome for a metric

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lift reported by the upstream experimentation platform.
///
/// splitstat never computes these values; they are carried through
/// unmodified (including fields it does not know about) so the platform's
/// verdict can be shown next to ours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lift {
    /// Relative lift over the baseline (0.05 = +5%)
    #[serde(default)]
    pub value: f64,
    /// Platform's own significance flag
    #[serde(default)]
    pub is_significant: bool,
    /// Direction reported by the platform (`better`, `worse`, ...)
    #[serde(default)]
    pub lift_status: String,
    /// Platform confidence in percent
    #[serde(default)]
    pub significance: f64,
    /// Any other fields, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Lift {
    /// Label for the platform's verdict.
    #[must_use]
    pub fn significance_label(&self) -> &'static str {
        match (self.is_significant, self.is_better()) {
            (true, true) => "Significant Improvement",
            (true, false) => "Significant Decline",
            (false, _) => "Not Significant",
        }
    }

    /// Whether the platform reports the variation as better than baseline.
    #[must_use]
    pub fn is_better(&self) -> bool {
        self.lift_status == "better"
    }
}

/// Variation Result represents one arm's exposure and conversion counts.
///
/// On the wire the platform names the counts `samples` and `value`.
/// Conversions are capped at the sample count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "WireVariation")]
pub struct VariationResult {
    #[serde(rename = "samples")]
    sample_count: u64,
    #[serde(rename = "value")]
    conversion_count: u64,
    is_baseline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lift: Option<Lift>,
}

#[derive(Deserialize)]
struct WireVariation {
    #[serde(default, deserialize_with = "de_count")]
    samples: u64,
    #[serde(default, deserialize_with = "de_count")]
    value: u64,
    #[serde(default)]
    is_baseline: bool,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    lift: Option<Lift>,
}

impl From<WireVariation> for VariationResult {
    fn from(wire: WireVariation) -> Self {
        if wire.value > wire.samples {
            tracing::warn!(
                samples = wire.samples,
                conversions = wire.value,
                "more conversions than samples, capping"
            );
        }
        Self {
            sample_count: wire.samples,
            conversion_count: wire.value.min(wire.samples),
            is_baseline: wire.is_baseline,
            name: wire.name,
            lift: wire.lift,
        }
    }
}

/// Largest count a payload may carry (2^53, the last exactly representable
/// integer in a JSON number).
pub const MAX_COUNT: u64 = 1 << 53;

/// Counts sometimes arrive as floats (`12.0`).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn de_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_finite() && (0.0..=MAX_COUNT as f64).contains(&raw) {
        Ok(raw.round() as u64)
    } else {
        Err(serde::de::Error::custom(format!(
            "count must be a number between 0 and {MAX_COUNT}, got {raw}"
        )))
    }
}

impl VariationResult {
    /// Create a variation result.
    ///
    /// # Arguments
    ///
    /// * `sample_count` - Units exposed to the variation
    /// * `conversion_count` - Units that converted (capped at `sample_count`)
    /// * `is_baseline` - Whether this arm is the control
    #[must_use]
    pub fn new(sample_count: u64, conversion_count: u64, is_baseline: bool) -> Self {
        Self {
            sample_count,
            conversion_count: conversion_count.min(sample_count),
            is_baseline,
            name: None,
            lift: None,
        }
    }

    /// Create a baseline (control) result.
    #[must_use]
    pub fn baseline(sample_count: u64, conversion_count: u64) -> Self {
        Self::new(sample_count, conversion_count, true)
    }

    /// Create a treatment result.
    #[must_use]
    pub fn treatment(sample_count: u64, conversion_count: u64) -> Self {
        Self::new(sample_count, conversion_count, false)
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach the platform-reported lift.
    #[must_use]
    pub fn with_lift(mut self, lift: Lift) -> Self {
        self.lift = Some(lift);
        self
    }

    /// Get the number of exposed units.
    #[must_use]
    pub const fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Get the number of converted units.
    #[must_use]
    pub const fn conversion_count(&self) -> u64 {
        self.conversion_count
    }

    /// Whether this arm is the baseline.
    #[must_use]
    pub const fn is_baseline(&self) -> bool {
        self.is_baseline
    }

    /// Get the display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the platform-reported lift, if any.
    #[must_use]
    pub const fn lift(&self) -> Option<&Lift> {
        self.lift.as_ref()
    }

    /// Observed conversion rate, or `None` with no samples.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn conversion_rate(&self) -> Option<f64> {
        (self.sample_count > 0).then(|| self.conversion_count as f64 / self.sample_count as f64)
    }
}

/// Variation id as a map key.
///
/// Canonical decimal ids below `u32::MAX` order numerically and come first;
/// any other id follows in string order. This is the order a JSON object's
/// keys enumerate in on the platform side, so "9" precedes "10".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct VariationId(String);

impl VariationId {
    fn index(&self) -> Option<u32> {
        let n: u32 = self.0.parse().ok()?;
        (n != u32::MAX && n.to_string() == self.0).then_some(n)
    }
}

impl Ord for VariationId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.index(), other.index()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for VariationId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Results of one metric, keyed by variation id.
///
/// Numeric ids iterate in ascending numeric order, followed by any other ids
/// in string order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MetricResults {
    variations: BTreeMap<VariationId, VariationResult>,
}

impl MetricResults {
    /// Create an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variation, replacing any previous result with the same id.
    pub fn insert(&mut self, variation_id: impl Into<String>, result: VariationResult) {
        self.variations.insert(VariationId(variation_id.into()), result);
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, variation_id: impl Into<String>, result: VariationResult) -> Self {
        self.insert(variation_id, result);
        self
    }

    /// Get a variation by id.
    #[must_use]
    pub fn get(&self, variation_id: &str) -> Option<&VariationResult> {
        self.variations.get(&VariationId(variation_id.to_string()))
    }

    /// Number of variations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variations.len()
    }

    /// Whether there are no variations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variations.is_empty()
    }

    /// Iterate over `(variation_id, result)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariationResult)> {
        self.variations.iter().map(|(id, result)| (id.0.as_str(), result))
    }

    /// Iterate over results.
    pub fn values(&self) -> impl Iterator<Item = &VariationResult> {
        self.variations.values()
    }

    /// Total exposed units across all variations, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_samples(&self) -> u64 {
        self.values()
            .map(VariationResult::sample_count)
            .fold(0, u64::saturating_add)
    }
}

impl<K: Into<String>> FromIterator<(K, VariationResult)> for MetricResults {
    fn from_iter<I: IntoIterator<Item = (K, VariationResult)>>(iter: I) -> Self {
        Self {
            variations: iter
                .into_iter()
                .map(|(k, v)| (VariationId(k.into()), v))
                .collect(),
        }
    }
}
