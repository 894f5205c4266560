// ABOUTME: Trend and sparkline summarizer over a reconciled observation series
// ABOUTME: Compares the oldest and newest halves of the latest six points and extracts recent samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::iter::FusedIterator;
use std::slice;
use std::sync::Arc;

use crate::aliases::AliasResolver;
use crate::constants::trends::{
    MIN_TREND_POINTS, SPARKLINE_MAX_POINTS, TREND_GROUP_SIZE, TREND_THRESHOLD_PERCENT,
};
use crate::models::{MetricStats, Observation, SparklinePoint, TrendDirection};

/// Lazy, restartable view over the most recent sparkline points, oldest first
///
/// Cloning the iterator restarts it from the same position; nothing is cached
/// between calls to [`TrendSummarizer::sparkline`].
#[derive(Debug, Clone)]
pub struct Sparkline<'a> {
    inner: slice::Iter<'a, SparklinePoint>,
}

impl Iterator for Sparkline<'_> {
    type Item = SparklinePoint;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Sparkline<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().copied()
    }
}

impl ExactSizeIterator for Sparkline<'_> {}

impl FusedIterator for Sparkline<'_> {}

/// Derives current/average/min/max, trend, and sparkline statistics
#[derive(Debug, Clone)]
pub struct TrendSummarizer {
    aliases: Arc<AliasResolver>,
}

impl TrendSummarizer {
    /// Create a summarizer sharing the reconciler's alias resolver
    #[must_use]
    pub const fn new(aliases: Arc<AliasResolver>) -> Self {
        Self { aliases }
    }

    /// Summarize every observation of `canonical_name` in `observations`
    ///
    /// Observations with non-finite values are skipped. Input order does not
    /// matter; points are sorted chronologically first.
    #[must_use]
    pub fn summarize(&self, canonical_name: &str, observations: &[Observation]) -> MetricStats {
        let points: Vec<SparklinePoint> = observations
            .iter()
            .filter(|o| o.value.is_finite() && self.aliases.matches(canonical_name, &o.metric_name))
            .map(|o| SparklinePoint {
                date: o.measurement_date,
                value: o.value,
            })
            .collect();
        Self::summarize_points(points)
    }

    /// Summarize an arbitrary series of points
    #[must_use]
    pub fn summarize_points(mut points: Vec<SparklinePoint>) -> MetricStats {
        points.sort_by_key(|point| point.date);

        let Some(last) = points.last() else {
            return MetricStats::default();
        };

        let values: Vec<f64> = points.iter().map(|point| point.value).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (trend, trend_percent) = Self::compute_trend(&values);

        MetricStats {
            current: last.value,
            average: mean(&values),
            min,
            max,
            trend,
            trend_percent,
            sparkline: Self::sparkline(&points).collect(),
            data_points: points.len(),
        }
    }

    /// Classify the trend of a chronologically sorted series
    ///
    /// Needs at least six values; the latest six are split into the oldest
    /// three and newest three and their means compared. Shorter series, and
    /// series whose older mean is zero, report `Stable` with 0%.
    #[must_use]
    pub fn compute_trend(values: &[f64]) -> (TrendDirection, f64) {
        if values.len() < MIN_TREND_POINTS {
            return (TrendDirection::Stable, 0.0);
        }

        let window = &values[values.len() - MIN_TREND_POINTS..];
        let (previous, recent) = window.split_at(TREND_GROUP_SIZE);
        let previous_avg = mean(previous);
        let recent_avg = mean(&recent[..TREND_GROUP_SIZE]);

        if previous_avg.abs() < f64::EPSILON {
            return (TrendDirection::Stable, 0.0);
        }

        let change = (recent_avg - previous_avg) / previous_avg * 100.0;
        let direction = if change > TREND_THRESHOLD_PERCENT {
            TrendDirection::Up
        } else if change < -TREND_THRESHOLD_PERCENT {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        };
        (direction, change)
    }

    /// Most recent points of a chronologically sorted series, oldest first
    #[must_use]
    pub fn sparkline(sorted_points: &[SparklinePoint]) -> Sparkline<'_> {
        let start = sorted_points.len().saturating_sub(SPARKLINE_MAX_POINTS);
        Sparkline {
            inner: sorted_points[start..].iter(),
        }
    }
}

/// Arithmetic mean, zero for an empty slice
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
