// ABOUTME: Derived read-only projections produced by reconciliation and trend summarization
// ABOUTME: Recomputed on every query; the metric store remains the system of record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::observation::SourceId;

/// Authoritative value selected for one reporting source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceData {
    /// Selected value
    pub value: f64,
    /// Unit of `value`
    pub unit: String,
    /// Reporting source
    pub source: SourceId,
    /// Measurement timestamp of the selected observation
    pub measurement_date: DateTime<Utc>,
    /// Confidence score, when the source provided one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Ingestion priority, when the source provided one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Whole hours between the measurement and the reference time, never negative
    pub age_hours: i64,
}

/// Per-source breakdown for one canonical metric, best entry first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Canonical metric that was reconciled
    pub canonical_name: String,
    /// One entry per reporting source, highest ranked first
    pub sources: Vec<SourceData>,
    /// Source of the first entry, absent when no source reported
    pub primary_source: Option<SourceId>,
}

impl Reconciliation {
    /// Reconciliation with no reporting sources
    #[must_use]
    pub fn empty(canonical_name: impl Into<String>) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            sources: Vec::new(),
            primary_source: None,
        }
    }

    /// Whether no source reported a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Highest ranked entry
    #[must_use]
    pub fn primary(&self) -> Option<&SourceData> {
        self.sources.first()
    }
}

/// Direction of recent change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Recent values are higher
    Up,
    /// Recent values are lower
    Down,
    /// No significant change, or not enough data to tell
    #[default]
    Stable,
}

/// One sparkline sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SparklinePoint {
    /// Sample timestamp
    pub date: DateTime<Utc>,
    /// Sample value
    pub value: f64,
}

/// Summary statistics over a reconciled series
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricStats {
    /// Most recent value
    pub current: f64,
    /// Mean of all values
    pub average: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Trend classification
    pub trend: TrendDirection,
    /// Percent change between the oldest and newest halves of the trend window
    pub trend_percent: f64,
    /// Most recent points, oldest first
    pub sparkline: Vec<SparklinePoint>,
    /// Number of points summarized
    pub data_points: usize,
}

/// Display-ready value for one canonical metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedMetric {
    /// Canonical metric name
    pub canonical_name: String,
    /// Best value
    pub value: f64,
    /// Unit of `value`
    pub unit: String,
    /// Source of the best value
    pub source: SourceId,
    /// Measurement timestamp of the best value
    pub date: DateTime<Utc>,
    /// Trend of the primary source's series
    pub trend: TrendDirection,
    /// Percent change behind `trend`
    pub trend_percent: f64,
    /// Primary source's recent series, oldest first
    pub sparkline: Vec<SparklinePoint>,
    /// Full per-source breakdown
    pub sources: Vec<SourceData>,
}
