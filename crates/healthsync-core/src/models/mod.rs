// ABOUTME: Core data models for observations, sources, windows, and reconciled projections
// ABOUTME: Observations are immutable facts; reconciled values are derived per query and never stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Observations, source identifiers, date windows, and daily summaries
pub mod observation;

/// Reconciled per-source entries, statistics, and unified metric values
pub mod reconciled;

pub use observation::{DailySummaryEntry, DateRange, Observation, SourceId};
pub use reconciled::{
    MetricStats, Reconciliation, SourceData, SparklinePoint, TrendDirection, UnifiedMetric,
};
