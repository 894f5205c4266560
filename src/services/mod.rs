// ABOUTME: Domain service layer for the reconciliation pipeline
// ABOUTME: Protocol-agnostic services reusable by the CLI and any future transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer

/// Unified metrics: fetch, fallback, reconciliation, and trend summary per metric
pub mod unified_metrics;

pub use unified_metrics::{MetricOutcome, UnifiedMetricsService};
