//! # splitstat: Experiment Statistics Engine
//!
//! Significance verdicts and remaining-duration forecasts for running A/B
//! tests and personalization campaigns, computed from the per-variation
//! conversion counts an experimentation platform reports.
//!
//! ## Design Principles
//!
//! - **One source of truth**: every consumer calls the same
//!   [`stats::evaluate_significance`] and [`stats::estimate_time_remaining`]
//! - **Never fail mid-render**: unusable input yields a neutral verdict or no
//!   forecast, never an error, `NaN` or infinity
//! - **Explicit configuration**: the minimum duration is a parameter
//!   ([`config::ForecastConfig`]), not ambient state
//! - **Honest output**: forecasts are heuristics and are labelled as
//!   estimates wherever they are shown
//!
//! ## Example Usage
//!
//! ```rust
//! use splitstat::experiment::{MetricResults, VariationResult};
//! use splitstat::stats::{evaluate_significance, SignificanceBand, SIGNIFICANT_P};
//!
//! let results = MetricResults::new()
//!     .with("control", VariationResult::baseline(1000, 100))
//!     .with("treatment", VariationResult::treatment(1000, 150));
//!
//! let verdict = evaluate_significance(&results, SIGNIFICANT_P);
//! assert!(verdict.is_significant);
//! assert_eq!(verdict.band(), SignificanceBand::HighlySignificant);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod cli;
pub mod config;
pub mod error;
pub mod experiment;
pub mod report;
pub mod stats;

pub use error::{Error, Result};
