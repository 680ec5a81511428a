//! Experiment Store - in-memory view over the fetched payload
//!
//! Holds A/B tests, personalization experiences and the campaigns that group
//! them, in platform order, and answers the dashboard's lookups: by id, by
//! search query, and as ready-to-render summaries.

use chrono::{DateTime, Utc};

use super::{Campaign, CampaignSummary, DashboardPayload, Experiment, ExperimentSummary};
use crate::config::ForecastConfig;

/// Which list an experiment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentKind {
    /// A/B test
    AbTest,
    /// Personalization experience, grouped under a [`Campaign`]
    Personalization,
}

/// In-memory store for fetched experiments and campaigns.
///
/// ## Design
///
/// Lists keep insertion order, which is the order the platform returned
/// them in. Lookups by id are linear; a dashboard holds tens of experiments,
/// not thousands. Experiences reference their campaign by id, so an
/// experience whose campaign is unknown is stored but never grouped.
#[derive(Debug, Default)]
pub struct ExperimentStore {
    experiments: Vec<Experiment>,
    experiences: Vec<Experiment>,
    campaigns: Vec<Campaign>,
}

impl ExperimentStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a fetched payload.
    #[must_use]
    pub fn from_payload(payload: DashboardPayload) -> Self {
        tracing::debug!(
            experiments = payload.a_b_tests.len(),
            experiences = payload.personalization_campaigns.len(),
            campaigns = payload.campaigns.len(),
            "loaded dashboard payload"
        );
        Self {
            experiments: payload.a_b_tests,
            experiences: payload.personalization_campaigns,
            campaigns: payload.campaigns,
        }
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty() && self.experiences.is_empty() && self.campaigns.is_empty()
    }

    /// Get the number of A/B tests.
    #[must_use]
    pub fn experiment_count(&self) -> usize {
        self.experiments.len()
    }

    /// Get the number of personalization experiences.
    #[must_use]
    pub fn experience_count(&self) -> usize {
        self.experiences.len()
    }

    /// Get the number of campaigns.
    #[must_use]
    pub fn campaign_count(&self) -> usize {
        self.campaigns.len()
    }

    /// Add an experiment. An existing entry with the same id is replaced in
    /// place.
    pub fn add(&mut self, kind: ExperimentKind, experiment: Experiment) {
        let list = self.list_mut(kind);
        match list.iter().position(|e| e.id() == experiment.id()) {
            Some(index) => list[index] = experiment,
            None => list.push(experiment),
        }
    }

    /// Add a campaign, replacing one with the same id.
    pub fn add_campaign(&mut self, campaign: Campaign) {
        match self.campaigns.iter().position(|c| c.id() == campaign.id()) {
            Some(index) => self.campaigns[index] = campaign,
            None => self.campaigns.push(campaign),
        }
    }

    /// Get an experiment by id from either list.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Experiment> {
        self.experiments
            .iter()
            .chain(&self.experiences)
            .find(|e| e.id() == id)
    }

    /// Get a campaign by id.
    #[must_use]
    pub fn get_campaign(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id() == id)
    }

    /// All experiments of `kind`.
    #[must_use]
    pub fn list(&self, kind: ExperimentKind) -> &[Experiment] {
        match kind {
            ExperimentKind::AbTest => &self.experiments,
            ExperimentKind::Personalization => &self.experiences,
        }
    }

    /// All campaigns.
    #[must_use]
    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    fn list_mut(&mut self, kind: ExperimentKind) -> &mut Vec<Experiment> {
        match kind {
            ExperimentKind::AbTest => &mut self.experiments,
            ExperimentKind::Personalization => &mut self.experiences,
        }
    }

    /// Experiences belonging to the campaign `campaign_id`, in platform order.
    pub fn experiences_of<'a>(
        &'a self,
        campaign_id: &'a str,
    ) -> impl Iterator<Item = &'a Experiment> + 'a {
        self.experiences
            .iter()
            .filter(move |e| e.campaign_id() == Some(campaign_id))
    }

    /// Experiments of `kind` matching `query`, in platform order.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use splitstat::experiment::{Experiment, ExperimentKind, ExperimentStore};
    ///
    /// let mut store = ExperimentStore::new();
    /// store.add(ExperimentKind::AbTest, Experiment::new("1", "Checkout flow"));
    /// store.add(ExperimentKind::AbTest, Experiment::new("2", "Pricing page"));
    ///
    /// let hits = store.search(ExperimentKind::AbTest, "CHECKOUT");
    /// assert_eq!(hits.len(), 1);
    /// assert_eq!(hits[0].id(), "1");
    /// ```
    #[must_use]
    pub fn search(&self, kind: ExperimentKind, query: &str) -> Vec<&Experiment> {
        self.list(kind).iter().filter(|e| e.matches(query)).collect()
    }

    /// Campaigns matching `query` on their own name or description, or
    /// through any of their experiences.
    #[must_use]
    pub fn search_campaigns(&self, query: &str) -> Vec<&Campaign> {
        self.campaigns
            .iter()
            .filter(|c| c.matches(query) || self.experiences_of(c.id()).any(|e| e.matches(query)))
            .collect()
    }

    /// Summaries of running experiments of `kind` matching `query`.
    #[must_use]
    pub fn summaries(
        &self,
        kind: ExperimentKind,
        query: &str,
        now: DateTime<Utc>,
        config: ForecastConfig,
    ) -> Vec<ExperimentSummary> {
        self.search(kind, query)
            .into_iter()
            .filter(|e| e.is_running())
            .map(|e| ExperimentSummary::new(e, now, config))
            .collect()
    }

    /// Summaries of running campaigns matching `query`.
    ///
    /// A matching campaign lists all of its running experiences, not only
    /// the ones that matched.
    #[must_use]
    pub fn campaign_summaries(
        &self,
        query: &str,
        now: DateTime<Utc>,
        config: ForecastConfig,
    ) -> Vec<CampaignSummary> {
        self.search_campaigns(query)
            .into_iter()
            .filter(|c| c.is_running())
            .map(|c| {
                let experiences = self.experiences_of(c.id()).filter(|e| e.is_running());
                CampaignSummary::new(c, experiences, now, config)
            })
            .collect()
    }
}
