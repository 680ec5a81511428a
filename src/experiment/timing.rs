//! Experiment timing - elapsed run time and the minimum-duration floor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ForecastConfig;

/// Timing inputs for the duration forecaster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExperimentTiming {
    start_date: Option<DateTime<Utc>>,
    elapsed_days: u32,
    minimum_duration_days: u32,
}

impl ExperimentTiming {
    /// Create timing from already-known values.
    #[must_use]
    pub const fn new(
        start_date: Option<DateTime<Utc>>,
        elapsed_days: u32,
        config: ForecastConfig,
    ) -> Self {
        Self {
            start_date,
            elapsed_days,
            minimum_duration_days: config.minimum_duration_days(),
        }
    }

    /// Derive timing from a start date and the current time.
    ///
    /// Elapsed days are whole days since `start_date`, rounded down. A start
    /// date in the future counts as zero elapsed days.
    #[must_use]
    pub fn since(
        start_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        config: ForecastConfig,
    ) -> Self {
        let elapsed_days = start_date.map_or(0, |start| elapsed_whole_days(start, now));
        Self::new(start_date, elapsed_days, config)
    }

    /// Get the start date, if known.
    #[must_use]
    pub const fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    /// Get the number of whole days elapsed.
    #[must_use]
    pub const fn elapsed_days(&self) -> u32 {
        self.elapsed_days
    }

    /// Get the minimum run length in days.
    #[must_use]
    pub const fn minimum_duration_days(&self) -> u32 {
        self.minimum_duration_days
    }
}

fn elapsed_whole_days(start: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let days = (now - start).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}
