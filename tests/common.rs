// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging, fixed reference times, and observation builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `healthsync`

use chrono::{DateTime, Duration, TimeZone, Utc};
use healthsync::intelligence::{AliasResolver, SourceRanking, SourceReconciler, TrendSummarizer};
use healthsync::models::{DateRange, Observation};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        // Another test binary helper may already have installed a subscriber
        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Fixed "now" used across tests: 2025-06-01 12:00 UTC
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// `hours` before the reference time
pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    reference_now() - Duration::hours(hours)
}

/// `days` before the reference time
pub fn days_ago(days: i64) -> DateTime<Utc> {
    reference_now() - Duration::days(days)
}

/// Seven-day window ending at the reference time
pub fn week_window() -> DateRange {
    DateRange::last_days(reference_now(), 7)
}

/// Observation with no priority or confidence
pub fn obs(metric: &str, source: &str, value: f64, date: DateTime<Utc>) -> Observation {
    Observation::new(metric, source, value, "kg", date)
}

/// Reconciler using the built-in aliases and default ranking
pub fn default_reconciler() -> SourceReconciler {
    SourceReconciler::new(Arc::new(AliasResolver::default()), SourceRanking::default())
}

/// Summarizer using the built-in aliases
pub fn default_summarizer() -> TrendSummarizer {
    TrendSummarizer::new(Arc::new(AliasResolver::default()))
}

/// One observation per value, a day apart, oldest first, ending at the reference time
pub fn daily_series(metric: &str, source: &str, values: &[f64]) -> Vec<Observation> {
    let last = values.len() as i64 - 1;
    values
        .iter()
        .enumerate()
        .map(|(index, value)| obs(metric, source, *value, days_ago(last - index as i64)))
        .collect()
}
