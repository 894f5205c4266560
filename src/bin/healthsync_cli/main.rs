// ABOUTME: HealthSync CLI - reconciles stored wearable observations and imports raw data
// ABOUTME: Reads configuration from the environment and prints results as JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Import raw observations and daily summaries for a user
//! healthsync-cli import --user 6f1c0c4e-8a4e-4c1e-9a57-3f5f3f1f9b11 --file observations.json
//!
//! # Reconcile metrics over the configured lookback
//! healthsync-cli reconcile --user 6f1c0c4e-8a4e-4c1e-9a57-3f5f3f1f9b11 \
//!     --metric Weight --metric HRV --metric "Max Heart Rate"
//!
//! # Reconcile over the last 30 days against a specific database
//! healthsync-cli --database-url sqlite:./data/health.db reconcile \
//!     --user 6f1c0c4e-8a4e-4c1e-9a57-3f5f3f1f9b11 --metric Steps --lookback-days 30
//! ```

mod commands;
mod helpers;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use healthsync::config::ReconciliationConfig;
use healthsync::constants::reconciliation::MAX_LOOKBACK_DAYS;
use healthsync::logging::{LogFormat, LoggingConfig};
use healthsync::providers::SqliteMetricStore;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "healthsync-cli",
    about = "HealthSync metric reconciliation CLI",
    long_about = "Reconciles observations reported by several wearables into one value per metric, with per-source breakdown and trend."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Reconcile canonical metrics for a user
    Reconcile {
        /// User identifier
        #[arg(long)]
        user: Uuid,

        /// Canonical metric name (repeatable)
        #[arg(long = "metric", required = true)]
        metrics: Vec<String>,

        /// Lookback window override in days
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=MAX_LOOKBACK_DAYS))]
        lookback_days: Option<i64>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Import raw observations and daily summaries from a JSON file
    Import {
        /// User identifier
        #[arg(long)]
        user: Uuid,

        /// JSON file holding an observation array or an object with
        /// `observations` and `daily_summaries`
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
        logging.format = LogFormat::Compact;
    }
    logging.init()?;

    let mut config = ReconciliationConfig::from_env().context("invalid configuration")?;
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }

    info!("Connecting to metric store: {}", config.database_url);
    let store = SqliteMetricStore::connect(&config.database_url)
        .await
        .context("failed to open metric store")?;

    match cli.command {
        Command::Reconcile {
            user,
            metrics,
            lookback_days,
            pretty,
        } => {
            if let Some(days) = lookback_days {
                config.lookback_days = days;
            }
            commands::reconcile::run(&config, store, user, &metrics, pretty).await?;
        }
        Command::Import { user, file } => {
            commands::import::run(&store, user, &file).await?;
        }
    }

    Ok(())
}
