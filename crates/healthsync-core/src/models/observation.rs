// ABOUTME: Observation model plus the source identifier and date window types it is filtered by
// ABOUTME: Includes the daily summary entry consumed by metric-specific fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, DurationRound, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{AppError, AppResult};

/// Normalized identifier of a wearable, device, or lab integration
///
/// Identifiers are trimmed and lowercased on construction so `"WHOOP"` and
/// `"whoop "` name the same source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SourceId(String);

impl SourceId {
    /// Create a normalized source identifier
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    /// Borrow the normalized identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SourceId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for SourceId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<SourceId> for String {
    fn from(id: SourceId) -> Self {
        id.0
    }
}

/// One raw, timestamped, source-attributed measurement
///
/// Observations are never mutated after ingestion. A later observation with
/// the same metric, source, and date supersedes an earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Raw metric name as reported by the source
    pub metric_name: String,
    /// Reporting source
    pub source: SourceId,
    /// Measured value
    pub value: f64,
    /// Unit of `value` (may be empty)
    pub unit: String,
    /// When the measurement was taken
    pub measurement_date: DateTime<Utc>,
    /// Optional ingestion priority; lower values rank higher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Optional quality signal in `[0, 1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

impl Observation {
    /// Create an observation without priority or confidence
    #[must_use]
    pub fn new(
        metric_name: impl Into<String>,
        source: impl Into<SourceId>,
        value: f64,
        unit: impl Into<String>,
        measurement_date: DateTime<Utc>,
    ) -> Self {
        Self {
            metric_name: metric_name.into(),
            source: source.into(),
            value,
            unit: unit.into(),
            measurement_date,
            priority: None,
            confidence_score: None,
        }
    }

    /// Set the ingestion priority
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the confidence score
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence_score = Some(confidence);
        self
    }
}

/// Inclusive time window `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// Window start (inclusive)
    pub start: DateTime<Utc>,
    /// Window end (inclusive)
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Create a window
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if `start` is after `end`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if start > end {
            return Err(AppError::invalid_input(format!(
                "date range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Window covering the `days` days that end at `end`
    #[must_use]
    pub fn last_days(end: DateTime<Utc>, days: i64) -> Self {
        Self {
            start: end - Duration::days(days.max(0)),
            end,
        }
    }

    /// Window covering at least the `days` days that end at `end`, with both
    /// bounds snapped to multiples of `step`
    ///
    /// Every `end` inside one `step` bucket yields the same window. The start
    /// is rounded down and the end rounded up, so the exact window is always
    /// contained.
    #[must_use]
    pub fn last_days_aligned(end: DateTime<Utc>, days: i64, step: Duration) -> Self {
        let floor = end.duration_trunc(step).unwrap_or(end);
        Self {
            start: floor - Duration::days(days.max(0)),
            end: floor + step,
        }
    }

    /// Whether `instant` falls inside the window
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Every calendar day touched by the window, oldest first
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        let last = self.end.date_naive();
        let mut day = self.start.date_naive();
        let mut dates = Vec::new();
        while day <= last {
            dates.push(day);
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        dates
    }
}

/// One field of a per-day summary from the secondary summary feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummaryEntry {
    /// Summary field name (e.g. `max_hr`)
    pub metric: String,
    /// Summary value
    pub value: f64,
    /// Calendar day summarized
    pub date: NaiveDate,
}
