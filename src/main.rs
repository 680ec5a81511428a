use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use splitstat::cli::{Cli, OutputFormat};
use splitstat::experiment::{DashboardPayload, ExperimentStore};
use splitstat::report::Report;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let config = args
        .forecast_config()
        .context("failed to load forecast settings")?;
    if args.save_settings {
        if let Some(path) = &args.settings {
            config
                .save(path)
                .with_context(|| format!("failed to save settings to {}", path.display()))?;
        }
    }

    let file = File::open(&args.payload)
        .with_context(|| format!("failed to open {}", args.payload.display()))?;
    let payload = DashboardPayload::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", args.payload.display()))?;

    let store = ExperimentStore::from_payload(payload);
    let now = args.now.unwrap_or_else(Utc::now);
    let report = Report::build(&store, &args.search, now, config);

    match args.format {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
