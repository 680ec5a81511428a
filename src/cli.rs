//! CLI argument parsing for splitstat

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};

use crate::config::ForecastConfig;
use crate::{Error, Result};

/// Output format for the report
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "splitstat")]
#[command(version)]
#[command(about = "Significance and estimated time remaining for running experiments")]
#[command(long_about = None)]
pub struct Cli {
    /// Dashboard payload (JSON with `a_b_tests`, `personalization_campaigns`
    /// and `campaigns`)
    #[arg(value_name = "PAYLOAD")]
    pub payload: PathBuf,

    /// Minimum experiment duration in days (clamped to 7..=90)
    #[arg(short = 'm', long = "minimum-duration", value_name = "DAYS")]
    pub minimum_duration: Option<u32>,

    /// Settings file holding `minimum_duration_days`
    #[arg(long = "settings", value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Write the effective minimum duration back to the settings file
    #[arg(long = "save-settings", requires = "settings")]
    pub save_settings: bool,

    /// Only show experiments whose name, description, metrics or variations match
    #[arg(short = 's', long = "search", value_name = "QUERY", default_value = "")]
    pub search: String,

    /// Evaluate as of this RFC 3339 timestamp instead of now
    #[arg(long = "now", value_name = "TIMESTAMP", value_parser = parse_timestamp)]
    pub now: Option<DateTime<Utc>>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Resolve the forecast configuration: flag, then settings file, then
    /// the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but is invalid.
    pub fn forecast_config(&self) -> Result<ForecastConfig> {
        if let Some(days) = self.minimum_duration {
            return Ok(ForecastConfig::clamped(days));
        }
        match &self.settings {
            Some(path) if path.exists() => ForecastConfig::load(path),
            _ => Ok(ForecastConfig::default()),
        }
    }
}

/// Parse an RFC 3339 timestamp into UTC.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] if `value` is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| Error::InvalidTimestamp(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["splitstat", "payload.json"]);
        assert_eq!(cli.payload, PathBuf::from("payload.json"));
        assert!(cli.minimum_duration.is_none());
        assert!(cli.search.is_empty());
        assert!(matches!(cli.format, OutputFormat::Text));
        assert_eq!(cli.forecast_config().unwrap(), ForecastConfig::default());
    }

    #[test]
    fn test_minimum_duration_flag_is_clamped() {
        let cli = Cli::parse_from(["splitstat", "p.json", "--minimum-duration", "3"]);
        assert_eq!(cli.forecast_config().unwrap().minimum_duration_days(), 7);
    }

    #[test]
    fn test_now_flag() {
        let cli = Cli::parse_from(["splitstat", "p.json", "--now", "2024-06-01T12:00:00+02:00"]);
        assert_eq!(cli.now.unwrap().to_rfc3339(), "2024-06-01T10:00:00+00:00");
    }

    #[test]
    fn test_invalid_now_rejected() {
        assert!(Cli::try_parse_from(["splitstat", "p.json", "--now", "yesterday"]).is_err());
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(Error::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_save_settings_requires_settings() {
        assert!(Cli::try_parse_from(["splitstat", "p.json", "--save-settings"]).is_err());
    }
}
