// ABOUTME: Reconcile command for healthsync-cli
// ABOUTME: Builds the reconciliation context from configuration and loads the requested metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use healthsync::cache::CachedMetricStore;
use healthsync::config::ReconciliationConfig;
use healthsync::context::ReconciliationContext;
use healthsync::providers::SqliteMetricStore;
use healthsync::services::UnifiedMetricsService;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::helpers::display::outcomes_to_json;

/// Reconcile `metrics` for `user` and print the outcomes as JSON
pub async fn run(
    config: &ReconciliationConfig,
    store: SqliteMetricStore,
    user: Uuid,
    metrics: &[String],
    pretty: bool,
) -> Result<()> {
    let context =
        ReconciliationContext::from_config(config).context("invalid reconciliation settings")?;

    let store = Arc::new(store);
    let cached = CachedMetricStore::new(Arc::clone(&store), &config.cache);
    let service = UnifiedMetricsService::new(context, cached, store);

    let names: Vec<&str> = metrics.iter().map(String::as_str).collect();
    info!(%user, metrics = names.len(), "Reconciling metrics");
    let outcomes = service.load(user, &names).await;

    let output = outcomes_to_json(&outcomes);
    let rendered = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}
