// ABOUTME: Fallback registry mapping canonical metric names to pseudo-observation strategies
// ABOUTME: Daily-summary fallback synthesizes low-confidence observations when no source reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{NaiveTime, TimeZone, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::constants::metric_names::{MAX_HEART_RATE, SUMMARY_MAX_HR};
use crate::constants::reconciliation::{FALLBACK_CONFIDENCE, FALLBACK_PRIORITY, FALLBACK_SOURCE};
use crate::models::{DailySummaryEntry, Observation};

/// Turns daily summaries into pseudo-observations for one canonical metric
pub trait FallbackStrategy: Send + Sync {
    /// Daily summary field this strategy reads
    fn summary_metric(&self) -> &str;

    /// Synthesize observations for `canonical_name` from `summaries`
    ///
    /// Synthesized observations must use `canonical_name` as their metric
    /// name so they pass alias filtering.
    fn synthesize(&self, canonical_name: &str, summaries: &[DailySummaryEntry])
        -> Vec<Observation>;
}

/// Reads one daily summary field and emits it as a low-confidence observation per day
#[derive(Debug, Clone)]
pub struct DailySummaryFallback {
    summary_metric: String,
    unit: String,
}

impl DailySummaryFallback {
    /// Create a fallback reading `summary_metric`, reported in `unit`
    #[must_use]
    pub fn new(summary_metric: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            summary_metric: summary_metric.into(),
            unit: unit.into(),
        }
    }
}

impl FallbackStrategy for DailySummaryFallback {
    fn summary_metric(&self) -> &str {
        &self.summary_metric
    }

    fn synthesize(
        &self,
        canonical_name: &str,
        summaries: &[DailySummaryEntry],
    ) -> Vec<Observation> {
        summaries
            .iter()
            .filter(|entry| entry.metric == self.summary_metric && entry.value.is_finite())
            .map(|entry| {
                let date = Utc.from_utc_datetime(&entry.date.and_time(NaiveTime::MIN));
                Observation::new(canonical_name, FALLBACK_SOURCE, entry.value, &self.unit, date)
                    .with_priority(FALLBACK_PRIORITY)
                    .with_confidence(FALLBACK_CONFIDENCE)
            })
            .collect()
    }
}

/// Registry of fallback strategies keyed by canonical metric name
///
/// Adding a fallback is a registration, never a new branch in the reconciler.
#[derive(Clone, Default)]
pub struct FallbackRegistry {
    strategies: HashMap<String, Arc<dyn FallbackStrategy>>,
}

impl fmt::Debug for FallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FallbackRegistry")
            .field("metrics", &names)
            .finish()
    }
}

impl FallbackRegistry {
    /// Registry with no strategies
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in strategies
    ///
    /// Currently registers "Max Heart Rate" from the `max_hr` daily summary field.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            MAX_HEART_RATE,
            Arc::new(DailySummaryFallback::new(SUMMARY_MAX_HR, "bpm")),
        );
        registry
    }

    /// Register `strategy` for `canonical_name`, returning any strategy it replaced
    pub fn register(
        &mut self,
        canonical_name: impl Into<String>,
        strategy: Arc<dyn FallbackStrategy>,
    ) -> Option<Arc<dyn FallbackStrategy>> {
        self.strategies.insert(canonical_name.into(), strategy)
    }

    /// Strategy registered for `canonical_name`
    #[must_use]
    pub fn get(&self, canonical_name: &str) -> Option<Arc<dyn FallbackStrategy>> {
        self.strategies.get(canonical_name).cloned()
    }

    /// Whether a strategy is registered for `canonical_name`
    #[must_use]
    pub fn contains(&self, canonical_name: &str) -> bool {
        self.strategies.contains_key(canonical_name)
    }

    /// Number of registered strategies
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
