//! Forecast configuration
//!
//! The minimum experiment duration is user-adjustable and persisted between
//! sessions. It is always passed explicitly into the forecaster.
//!
//! ```rust
//! use splitstat::config::ForecastConfig;
//!
//! let config = ForecastConfig::new(21)?;
//! assert_eq!(config.minimum_duration_days(), 21);
//!
//! // Out-of-range input from a settings form is clamped, not rejected
//! assert_eq!(ForecastConfig::clamped(365).minimum_duration_days(), 90);
//! # Ok::<(), splitstat::Error>(())
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default minimum experiment duration (two weeks)
pub const DEFAULT_MINIMUM_DURATION_DAYS: u32 = 14;

/// Shortest accepted minimum duration (one week)
pub const MIN_ALLOWED_DURATION_DAYS: u32 = 7;

/// Longest accepted minimum duration (roughly three months)
pub const MAX_ALLOWED_DURATION_DAYS: u32 = 90;

/// Configuration consumed by the duration forecaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_minimum_duration")]
    minimum_duration_days: u32,
}

const fn default_minimum_duration() -> u32 {
    DEFAULT_MINIMUM_DURATION_DAYS
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            minimum_duration_days: DEFAULT_MINIMUM_DURATION_DAYS,
        }
    }
}

impl ForecastConfig {
    /// Create a configuration, rejecting values outside `[7, 90]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMinimumDuration`] when `minimum_duration_days`
    /// is out of range.
    pub fn new(minimum_duration_days: u32) -> Result<Self> {
        if minimum_duration_days < MIN_ALLOWED_DURATION_DAYS
            || minimum_duration_days > MAX_ALLOWED_DURATION_DAYS
        {
            return Err(Error::InvalidMinimumDuration {
                days: minimum_duration_days,
                min: MIN_ALLOWED_DURATION_DAYS,
                max: MAX_ALLOWED_DURATION_DAYS,
            });
        }
        Ok(Self {
            minimum_duration_days,
        })
    }

    /// Create a configuration, clamping the value into `[7, 90]`.
    #[must_use]
    pub fn clamped(minimum_duration_days: u32) -> Self {
        let clamped =
            minimum_duration_days.clamp(MIN_ALLOWED_DURATION_DAYS, MAX_ALLOWED_DURATION_DAYS);
        if clamped != minimum_duration_days {
            tracing::warn!(
                requested = minimum_duration_days,
                clamped,
                "minimum duration out of range, clamping"
            );
        }
        Self {
            minimum_duration_days: clamped,
        }
    }

    /// Get the minimum experiment duration in days.
    #[must_use]
    pub const fn minimum_duration_days(&self) -> u32 {
        self.minimum_duration_days
    }

    /// Parse a configuration from JSON.
    ///
    /// A missing `minimum_duration_days` falls back to the default.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or an out-of-range duration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Self = serde_json::from_str(json)?;
        Self::new(raw.minimum_duration_days)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            days = config.minimum_duration_days,
            "loaded forecast config"
        );
        Ok(config)
    }

    /// Persist the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
