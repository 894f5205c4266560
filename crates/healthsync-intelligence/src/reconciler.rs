// ABOUTME: Source reconciler selecting one authoritative observation per source for a canonical metric
// ABOUTME: Ranks sources by recency, then source ranking, priority, and confidence; computes age in hours
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Source Reconciliation
//!
//! Given every observation fetched for a lookback window, the reconciler
//! keeps those that satisfy the canonical metric, picks the most recent one
//! per source, and orders the survivors so the first entry is the value to
//! display.
//!
//! Ordering between sources:
//! 1. `measurement_date`, newest first
//! 2. `SourceRanking` position
//! 3. `priority`, lower first (missing sorts last)
//! 4. `confidence_score`, higher first (missing sorts last)
//! 5. source identifier, for a deterministic result
//!
//! Within one source, equal dates are broken by higher confidence, then lower
//! priority, then the later observation in input order.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::aliases::AliasResolver;
use crate::constants::reconciliation::SECONDS_PER_HOUR;
use crate::models::{DateRange, Observation, Reconciliation, SourceData};
use crate::ranking::SourceRanking;

/// Whole hours from `measurement_date` to `now`, clamped to zero for future dates
#[must_use]
pub fn age_hours(measurement_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - measurement_date).num_seconds().max(0) / SECONDS_PER_HOUR
}

/// Sort key for a missing priority: below every assigned priority
fn priority_key(observation: &Observation) -> i32 {
    observation.priority.unwrap_or(i32::MAX)
}

/// Sort key for a missing confidence: below every assigned confidence
fn confidence_key(observation: &Observation) -> f64 {
    observation.confidence_score.unwrap_or(f64::NEG_INFINITY)
}

/// Whether `candidate` replaces `current` as the selected observation of one source
fn supersedes(candidate: &Observation, current: &Observation) -> bool {
    candidate
        .measurement_date
        .cmp(&current.measurement_date)
        .then_with(|| confidence_key(candidate).total_cmp(&confidence_key(current)))
        .then_with(|| priority_key(current).cmp(&priority_key(candidate)))
        != Ordering::Less
}

/// Reconciles observations from multiple sources into a ranked per-source breakdown
#[derive(Debug, Clone)]
pub struct SourceReconciler {
    aliases: Arc<AliasResolver>,
    ranking: SourceRanking,
}

impl SourceReconciler {
    /// Create a reconciler over a shared alias resolver and a source ranking
    #[must_use]
    pub const fn new(aliases: Arc<AliasResolver>, ranking: SourceRanking) -> Self {
        Self { aliases, ranking }
    }

    /// Alias resolver used for filtering
    #[must_use]
    pub fn aliases(&self) -> &AliasResolver {
        &self.aliases
    }

    /// Source ranking used for tie-breaks
    #[must_use]
    pub const fn ranking(&self) -> &SourceRanking {
        &self.ranking
    }

    /// Reconcile against the current time
    #[must_use]
    pub fn reconcile(
        &self,
        canonical_name: &str,
        observations: &[Observation],
        window: &DateRange,
    ) -> Reconciliation {
        self.reconcile_at(canonical_name, observations, window, Utc::now())
    }

    /// Reconcile with an explicit reference time for `age_hours`
    #[must_use]
    pub fn reconcile_at(
        &self,
        canonical_name: &str,
        observations: &[Observation],
        window: &DateRange,
        now: DateTime<Utc>,
    ) -> Reconciliation {
        let mut latest: HashMap<_, &Observation> = HashMap::new();
        let mut retained = 0_usize;

        for observation in observations {
            if !observation.value.is_finite()
                || !window.contains(observation.measurement_date)
                || !self
                    .aliases
                    .matches(canonical_name, &observation.metric_name)
            {
                continue;
            }
            retained += 1;
            match latest.entry(&observation.source) {
                Entry::Vacant(slot) => {
                    slot.insert(observation);
                }
                Entry::Occupied(mut slot) => {
                    if supersedes(observation, slot.get()) {
                        slot.insert(observation);
                    }
                }
            }
        }

        let mut selected: Vec<&Observation> = latest.into_values().collect();
        selected.sort_by(|a, b| self.compare_sources(a, b));

        let sources: Vec<SourceData> = selected
            .into_iter()
            .map(|observation| SourceData {
                value: observation.value,
                unit: observation.unit.clone(),
                source: observation.source.clone(),
                measurement_date: observation.measurement_date,
                confidence: observation.confidence_score,
                priority: observation.priority,
                age_hours: age_hours(observation.measurement_date, now),
            })
            .collect();

        let primary_source = sources.first().map(|entry| entry.source.clone());

        debug!(
            metric = canonical_name,
            input = observations.len(),
            retained,
            sources = sources.len(),
            primary = ?primary_source,
            "Reconciled metric"
        );

        Reconciliation {
            canonical_name: canonical_name.to_owned(),
            sources,
            primary_source,
        }
    }

    /// Reconcile independent metrics in parallel
    ///
    /// Results are returned in the order of `requests`.
    #[must_use]
    pub fn reconcile_batch(
        &self,
        requests: &[(&str, &[Observation])],
        window: &DateRange,
        now: DateTime<Utc>,
    ) -> Vec<Reconciliation> {
        requests
            .par_iter()
            .map(|(canonical_name, observations)| {
                self.reconcile_at(canonical_name, observations, window, now)
            })
            .collect()
    }

    /// Ordering between the selected observations of two different sources
    fn compare_sources(&self, a: &Observation, b: &Observation) -> Ordering {
        b.measurement_date
            .cmp(&a.measurement_date)
            .then_with(|| self.ranking.compare(&a.source, &b.source))
            .then_with(|| priority_key(a).cmp(&priority_key(b)))
            .then_with(|| confidence_key(b).total_cmp(&confidence_key(a)))
            .then_with(|| a.source.cmp(&b.source))
    }
}
