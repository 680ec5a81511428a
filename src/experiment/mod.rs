//! Experiment data model
//!
//! Types for the data the platform reports and the summaries derived from
//! it.
//!
//! ```text
//! DashboardPayload
//!   ├──< Experiment (A/B tests)
//!   ├──< Campaign
//!   │      ┆ campaign_id
//!   └──< Experiment (personalization experiences)
//!          └──< Metric ──< VariationResult (keyed by variation id)
//!                             └── Lift (platform-reported, passthrough)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use splitstat::config::ForecastConfig;
//! use splitstat::experiment::{Experiment, Metric, MetricResults, VariationResult};
//!
//! let results = MetricResults::new()
//!     .with("control", VariationResult::baseline(4000, 200))
//!     .with("variant", VariationResult::treatment(4000, 260));
//!
//! let experiment = Experiment::builder("exp-001", "Checkout button")
//!     .earliest(Utc::now() - Duration::days(5))
//!     .metric(Metric::new("Purchases", results))
//!     .build();
//!
//! let forecast = experiment.forecast(Utc::now(), ForecastConfig::default());
//! assert!(forecast.is_some());
//! ```

mod campaign_record;
mod experiment_record;
mod metric_record;
mod payload;
mod store;
mod summary;
mod timing;
mod variation;

pub use campaign_record::Campaign;
pub use experiment_record::{Experiment, ExperimentBuilder, VariationInfo};
pub use metric_record::Metric;
pub use payload::DashboardPayload;
pub use store::{ExperimentKind, ExperimentStore};
pub use summary::{CampaignSummary, ExperimentSummary, MetricSummary, VariationSummary};
pub use timing::ExperimentTiming;
pub use variation::{Lift, MetricResults, VariationResult, MAX_COUNT};
