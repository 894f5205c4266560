// ABOUTME: Import command for healthsync-cli
// ABOUTME: Validates raw observation and daily summary rows from a JSON file and stores them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use healthsync::providers::boundary::{
    validate_observations, validate_summaries, RawDailySummary, RawObservation,
};
use healthsync::providers::SqliteMetricStore;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

/// Accepted import file layouts
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Batch {
        #[serde(default)]
        observations: Vec<RawObservation>,
        #[serde(default, alias = "dailySummaries")]
        daily_summaries: Vec<RawDailySummary>,
    },
    Observations(Vec<RawObservation>),
}

/// Load `file` into the store for `user` and print the counts as JSON
pub async fn run(store: &SqliteMetricStore, user: Uuid, file: &Path) -> Result<()> {
    let contents = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let parsed: ImportFile = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a valid import file", file.display()))?;

    let (raw_observations, raw_summaries) = match parsed {
        ImportFile::Batch {
            observations,
            daily_summaries,
        } => (observations, daily_summaries),
        ImportFile::Observations(observations) => (observations, Vec::new()),
    };

    let received = raw_observations.len() + raw_summaries.len();
    let observations = validate_observations(raw_observations);
    let summaries = validate_summaries(raw_summaries);
    let skipped = received - observations.len() - summaries.len();
    if skipped > 0 {
        warn!(skipped, "Skipped malformed rows");
    }

    let imported = store.insert_observations(user, &observations).await?;
    for summary in &summaries {
        store.insert_daily_summary(user, summary).await?;
    }
    info!(%user, imported, summaries = summaries.len(), "Import complete");

    println!(
        "{}",
        json!({
            "user_id": user,
            "observations": imported,
            "daily_summaries": summaries.len(),
            "skipped": skipped,
        })
    );
    Ok(())
}
