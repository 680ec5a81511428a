//! Dashboard payload - the already-fetched platform data

use std::io::Read;

use serde::{Deserialize, Serialize};

use super::{Campaign, Experiment};
use crate::Result;

/// Everything the data-fetch layer hands over for one project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardPayload {
    /// A/B tests
    #[serde(default)]
    pub a_b_tests: Vec<Experiment>,
    /// Personalization experiences, linked to `campaigns` by `campaign_id`
    #[serde(default)]
    pub personalization_campaigns: Vec<Experiment>,
    /// Campaigns
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}

impl DashboardPayload {
    /// Parse a payload from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a payload from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or malformed JSON.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.a_b_tests.is_empty()
            && self.personalization_campaigns.is_empty()
            && self.campaigns.is_empty()
    }
}
