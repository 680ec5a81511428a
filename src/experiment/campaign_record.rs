//! Campaign - a personalization campaign grouping several experiences

use serde::{Deserialize, Serialize};

use super::experiment_record::de_id;

/// Campaign as listed by the platform.
///
/// Its experiences are ordinary [`Experiment`](super::Experiment)s whose
/// `campaign_id` points back here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Campaign {
    #[serde(deserialize_with = "de_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
}

impl Campaign {
    /// Create a campaign.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            status: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the platform status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Get the campaign id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the campaign name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the platform status, if reported.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether the platform reports the campaign as `running`.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status.as_deref() == Some("running")
    }

    /// Case-insensitive search over the campaign's own name and description.
    ///
    /// Matches through its experiences are resolved by
    /// [`ExperimentStore::search_campaigns`](super::ExperimentStore::search_campaigns).
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let hit = |text: &str| text.to_lowercase().contains(&query);
        hit(&self.name) || self.description.as_deref().is_some_and(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wire() {
        let json = r#"{"id": 9001, "name": "Returning Visitors", "status": "running",
                       "project_id": 42}"#;
        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign.id(), "9001");
        assert!(campaign.is_running());
        assert!(campaign.description().is_none());
    }

    #[test]
    fn test_matches_own_fields() {
        let campaign =
            Campaign::new("1", "Holiday Promotions").with_description("Seasonal banners");
        assert!(campaign.matches(""));
        assert!(campaign.matches("HOLIDAY"));
        assert!(campaign.matches("banners"));
        assert!(!campaign.matches("checkout"));
    }
}
