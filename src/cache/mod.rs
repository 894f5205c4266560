// ABOUTME: Observation cache layer in front of a metric store
// ABOUTME: Keys fetches by user, metric names, and window; freshness is a caller concern, not a correctness one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory LRU cache with TTL wrapping a `MetricStore`
pub mod memory;

pub use memory::CachedMetricStore;

use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

use crate::models::DateRange;

/// Identity of one metric store fetch
///
/// Metric names are kept sorted and deduplicated so the same request in a
/// different order hits the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// User whose observations were fetched
    pub user_id: Uuid,
    /// Raw metric names requested
    pub metric_names: BTreeSet<String>,
    /// Requested window
    pub range: DateRange,
}

impl CacheKey {
    /// Build a key for a fetch
    #[must_use]
    pub fn new(user_id: Uuid, metric_names: &[String], range: DateRange) -> Self {
        Self {
            user_id,
            metric_names: metric_names.iter().cloned().collect(),
            range,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.metric_names.iter().map(String::as_str).collect();
        write!(
            f,
            "user:{}:metrics:{}:range:{}..{}",
            self.user_id,
            names.join(","),
            self.range.start.to_rfc3339(),
            self.range.end.to_rfc3339()
        )
    }
}
