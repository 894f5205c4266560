// ABOUTME: Reconciliation engine that merges wearable observations into one value per metric
// ABOUTME: Alias resolution, source ranking, fallback registry, and trend/sparkline summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # HealthSync Intelligence
//!
//! Pure, synchronous computation over observation snapshots the caller has
//! already fetched. Nothing here performs I/O or holds mutable shared state,
//! so every call can run independently and in parallel.

// Re-export core modules so algorithm code can keep `use crate::models::*`
pub use healthsync_core::constants;
pub use healthsync_core::errors;
pub use healthsync_core::models;

/// Canonical metric name to raw name equivalence sets
pub mod aliases;
/// Metric-specific fallbacks that synthesize pseudo-observations
pub mod fallback;
/// Total order over known sources
pub mod ranking;
/// Per-source selection and ranking
pub mod reconciler;
/// Trend classification and sparkline extraction
pub mod trends;

pub use aliases::AliasResolver;
pub use fallback::{DailySummaryFallback, FallbackRegistry, FallbackStrategy};
pub use ranking::SourceRanking;
pub use reconciler::{age_hours, SourceReconciler};
pub use trends::{Sparkline, TrendSummarizer};
