// ABOUTME: Boundary validation turning loosely typed store/API rows into domain observations
// ABOUTME: Applies the missing-field default policy once and drops malformed rows with a debug log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Boundary Validation
//!
//! Default policy for fields arriving from a store or provider response:
//!
//! | Field              | Missing / invalid                       |
//! |--------------------|-----------------------------------------|
//! | `metric_name`      | row dropped                             |
//! | `source`           | row dropped                             |
//! | `value`            | row dropped (also when non-finite)      |
//! | `measurement_date` | row dropped                             |
//! | `unit`             | empty string                            |
//! | `priority`         | `None` (also when outside `i32`)        |
//! | `confidence_score` | `None` when non-finite, else clamped to `[0, 1]` |

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::models::{DailySummaryEntry, Observation, SourceId};

/// Naive timestamp layouts accepted in addition to RFC 3339
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Observation row as delivered by a store or provider, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Raw metric name
    #[serde(default, alias = "metricName")]
    pub metric_name: Option<String>,
    /// Source identifier
    #[serde(default)]
    pub source: Option<String>,
    /// Number or numeric string
    #[serde(default)]
    pub value: Option<Value>,
    /// Unit label
    #[serde(default)]
    pub unit: Option<String>,
    /// RFC 3339 timestamp, naive timestamp (UTC), or `YYYY-MM-DD`
    #[serde(default, alias = "measurementDate", alias = "date")]
    pub measurement_date: Option<String>,
    /// Ingestion priority
    #[serde(default)]
    pub priority: Option<i64>,
    /// Quality signal
    #[serde(default, alias = "confidenceScore", alias = "confidence")]
    pub confidence_score: Option<f64>,
}

impl RawObservation {
    /// Validate into an `Observation`, or `None` if a required field is missing or malformed
    #[must_use]
    pub fn validate(&self) -> Option<Observation> {
        let metric_name = non_empty(self.metric_name.as_deref())?;
        let source = non_empty(self.source.as_deref())?;
        let value = self.value.as_ref().and_then(parse_value)?;
        let measurement_date = self
            .measurement_date
            .as_deref()
            .and_then(parse_measurement_date)?;

        Some(Observation {
            metric_name,
            source: SourceId::new(source),
            value,
            unit: self.unit.clone().unwrap_or_default(),
            measurement_date,
            priority: self.priority.and_then(|p| i32::try_from(p).ok()),
            confidence_score: self
                .confidence_score
                .filter(|c| c.is_finite())
                .map(|c| c.clamp(0.0, 1.0)),
        })
    }
}

/// Daily summary row as delivered by the summary feed, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDailySummary {
    /// Summary field name
    #[serde(default)]
    pub metric: Option<String>,
    /// Number or numeric string
    #[serde(default)]
    pub value: Option<Value>,
    /// `YYYY-MM-DD` or any timestamp accepted for observations
    #[serde(default)]
    pub date: Option<String>,
}

impl RawDailySummary {
    /// Validate into a `DailySummaryEntry`, or `None` if malformed
    #[must_use]
    pub fn validate(&self) -> Option<DailySummaryEntry> {
        let metric = non_empty(self.metric.as_deref())?;
        let value = self.value.as_ref().and_then(parse_value)?;
        let date = self.date.as_deref().and_then(parse_summary_date)?;
        Some(DailySummaryEntry {
            metric,
            value,
            date,
        })
    }
}

/// Validate a batch, dropping malformed rows
#[must_use]
pub fn validate_observations<I>(rows: I) -> Vec<Observation>
where
    I: IntoIterator<Item = RawObservation>,
{
    let mut dropped = 0_usize;
    let observations: Vec<Observation> = rows
        .into_iter()
        .filter_map(|row| {
            let validated = row.validate();
            if validated.is_none() {
                dropped += 1;
                debug!(row = ?row, "Dropping malformed observation");
            }
            validated
        })
        .collect();
    if dropped > 0 {
        debug!(
            kept = observations.len(),
            dropped, "Excluded malformed observations from batch"
        );
    }
    observations
}

/// Validate a batch of summaries, dropping malformed rows
#[must_use]
pub fn validate_summaries<I>(rows: I) -> Vec<DailySummaryEntry>
where
    I: IntoIterator<Item = RawDailySummary>,
{
    rows.into_iter()
        .filter_map(|row| {
            let validated = row.validate();
            if validated.is_none() {
                debug!(row = ?row, "Dropping malformed daily summary");
            }
            validated
        })
        .collect()
}

/// Parse a measurement timestamp; date-only values are midnight UTC
#[must_use]
pub fn parse_measurement_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Parse a summary date, accepting full timestamps by taking their UTC day
fn parse_summary_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| parse_measurement_date(raw).map(|ts| ts.date_naive()))
}

/// Parse a finite number from a JSON number or numeric string
#[must_use]
pub fn parse_value(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

/// Trimmed string, or `None` when missing or blank
fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned)
}
