// ABOUTME: Unified metrics service producing one display value per canonical metric
// ABOUTME: Fetches metrics concurrently, applies fallbacks, reconciles sources, and summarizes trends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use futures_util::future::join_all;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::constants::reconciliation::WINDOW_ALIGNMENT_SECS;
use crate::context::ReconciliationContext;
use crate::errors::AppError;
use crate::models::{DateRange, Observation, Reconciliation, UnifiedMetric};
use crate::providers::{DailySummaryStore, MetricStore, StoreResult};

/// Result of loading one canonical metric
///
/// Outcomes are independent: one metric's store failure never hides
/// another metric's data.
#[derive(Debug)]
pub enum MetricOutcome {
    /// A reconciled value with its breakdown and trend
    Ready(UnifiedMetric),
    /// No source reported the metric in the window and no fallback applied
    NoData,
    /// A collaborator failed while loading the metric
    Unavailable(AppError),
}

impl MetricOutcome {
    /// Reconciled value, if one was produced
    #[must_use]
    pub const fn metric(&self) -> Option<&UnifiedMetric> {
        match self {
            Self::Ready(metric) => Some(metric),
            Self::NoData | Self::Unavailable(_) => None,
        }
    }

    /// Whether a value was produced
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Whether the metric had no data
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    /// Whether loading failed
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Loads reconciled metrics for a user from a metric store and summary feed
pub struct UnifiedMetricsService<M, D> {
    context: ReconciliationContext,
    metric_store: M,
    summary_store: D,
}

impl<M: MetricStore, D: DailySummaryStore> UnifiedMetricsService<M, D> {
    /// Create a service over the given stores
    #[must_use]
    pub const fn new(context: ReconciliationContext, metric_store: M, summary_store: D) -> Self {
        Self {
            context,
            metric_store,
            summary_store,
        }
    }

    /// Reconciliation dependencies in use
    #[must_use]
    pub const fn context(&self) -> &ReconciliationContext {
        &self.context
    }

    /// Load every requested metric over the configured lookback ending now
    ///
    /// Results keep the order of `canonical_names`.
    pub async fn load(
        &self,
        user_id: Uuid,
        canonical_names: &[&str],
    ) -> Vec<(String, MetricOutcome)> {
        self.load_at(user_id, canonical_names, Utc::now()).await
    }

    /// Load every requested metric over the configured lookback ending at `now`
    ///
    /// The window is snapped to `WINDOW_ALIGNMENT_SECS` so loads close in time
    /// issue identical fetches and share observation cache entries.
    #[instrument(skip(self, canonical_names), fields(metrics = canonical_names.len()))]
    pub async fn load_at(
        &self,
        user_id: Uuid,
        canonical_names: &[&str],
        now: DateTime<Utc>,
    ) -> Vec<(String, MetricOutcome)> {
        let window = self.window_ending(now);
        let outcomes = join_all(
            canonical_names
                .iter()
                .map(|name| self.load_in_window(user_id, name, &window, now)),
        )
        .await;

        let ready = outcomes.iter().filter(|o| o.is_ready()).count();
        info!(
            %user_id,
            requested = canonical_names.len(),
            ready,
            "Loaded unified metrics"
        );

        canonical_names
            .iter()
            .map(|name| (*name).to_owned())
            .zip(outcomes)
            .collect()
    }

    /// Load a single metric over the configured lookback ending now
    pub async fn load_one(&self, user_id: Uuid, canonical_name: &str) -> MetricOutcome {
        let now = Utc::now();
        let window = self.window_ending(now);
        self.load_in_window(user_id, canonical_name, &window, now).await
    }

    /// Lookback window ending at `now`, aligned for cache reuse
    fn window_ending(&self, now: DateTime<Utc>) -> DateRange {
        DateRange::last_days_aligned(
            now,
            self.context.lookback_days,
            Duration::seconds(WINDOW_ALIGNMENT_SECS),
        )
    }

    async fn load_in_window(
        &self,
        user_id: Uuid,
        canonical_name: &str,
        window: &DateRange,
        now: DateTime<Utc>,
    ) -> MetricOutcome {
        match self.reconcile_metric(user_id, canonical_name, window, now).await {
            Ok((reconciliation, series)) => self
                .unify(&reconciliation, &series, window)
                .map_or_else(
                    || {
                        debug!(metric = canonical_name, "No source reported metric");
                        MetricOutcome::NoData
                    },
                    MetricOutcome::Ready,
                ),
            Err(e) => {
                warn!(
                    metric = canonical_name,
                    %user_id,
                    error = %e,
                    "Metric unavailable"
                );
                MetricOutcome::Unavailable(AppError::from(e))
            }
        }
    }

    /// Reconcile one metric, returning the observations the result was chosen from
    ///
    /// Daily summaries are fetched only when no source reported the metric
    /// and a fallback is registered for it.
    async fn reconcile_metric(
        &self,
        user_id: Uuid,
        canonical_name: &str,
        window: &DateRange,
        now: DateTime<Utc>,
    ) -> StoreResult<(Reconciliation, Vec<Observation>)> {
        let reconciler = &self.context.reconciler;
        let raw_names: Vec<String> = reconciler
            .aliases()
            .resolve(canonical_name)
            .into_iter()
            .collect();
        let observations = self.metric_store.fetch(user_id, &raw_names, window).await?;

        let direct = reconciler.reconcile_at(canonical_name, &observations, window, now);
        if !direct.is_empty() {
            return Ok((direct, observations));
        }
        let Some(strategy) = self.context.fallbacks.get(canonical_name) else {
            return Ok((direct, observations));
        };

        let summaries = self
            .summary_store
            .fetch_daily_summary(user_id, &window.dates())
            .await?;
        let synthesized = strategy.synthesize(canonical_name, &summaries);
        debug!(
            metric = canonical_name,
            summaries = summaries.len(),
            synthesized = synthesized.len(),
            "Applying fallback strategy"
        );
        let reconciliation = reconciler.reconcile_at(canonical_name, &synthesized, window, now);
        Ok((reconciliation, synthesized))
    }

    /// Combine the primary entry with the primary source's series summary
    fn unify(
        &self,
        reconciliation: &Reconciliation,
        observations: &[Observation],
        window: &DateRange,
    ) -> Option<UnifiedMetric> {
        let primary = reconciliation.primary()?;
        let series: Vec<Observation> = observations
            .iter()
            .filter(|o| o.source == primary.source && window.contains(o.measurement_date))
            .cloned()
            .collect();
        let stats = self
            .context
            .summarizer
            .summarize(&reconciliation.canonical_name, &series);

        Some(UnifiedMetric {
            canonical_name: reconciliation.canonical_name.clone(),
            value: primary.value,
            unit: primary.unit.clone(),
            source: primary.source.clone(),
            date: primary.measurement_date,
            trend: stats.trend,
            trend_percent: stats.trend_percent,
            sparkline: stats.sparkline,
            sources: reconciliation.sources.clone(),
        })
    }
}
