// ABOUTME: Application constants for reconciliation, trend analysis, sources, and configuration keys
// ABOUTME: Centralizes thresholds and defaults so algorithms and config share one definition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cache-related constants for TTL and capacity
pub mod cache;

/// Multi-source reconciliation constants
pub mod reconciliation {
    /// Default lookback window callers fetch from the metric store
    pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;

    /// Longest lookback window accepted from configuration or callers
    pub const MAX_LOOKBACK_DAYS: i64 = 366;

    /// Granularity service windows are snapped to, so repeated loads share cache keys
    pub const WINDOW_ALIGNMENT_SECS: i64 = 60;

    /// Seconds per hour, used for `age_hours`
    pub const SECONDS_PER_HOUR: i64 = 3_600;

    /// Priority assigned to pseudo-observations synthesized by fallbacks.
    /// Lower values rank higher, so this sits below any provider-assigned priority.
    pub const FALLBACK_PRIORITY: i32 = 99;

    /// Confidence assigned to pseudo-observations synthesized by fallbacks
    pub const FALLBACK_CONFIDENCE: f64 = 0.3;

    /// Source identifier carried by fallback pseudo-observations
    pub const FALLBACK_SOURCE: &str = "daily_summary";
}

/// Trend and sparkline constants
pub mod trends {
    /// Minimum chronologically sorted points before a trend is computed
    pub const MIN_TREND_POINTS: usize = 6;

    /// Points per comparison group (oldest-of-window vs newest-of-window)
    pub const TREND_GROUP_SIZE: usize = 3;

    /// Percent change above which a trend is `up` (and below the negation, `down`)
    pub const TREND_THRESHOLD_PERCENT: f64 = 5.0;

    /// Maximum number of sparkline points
    pub const SPARKLINE_MAX_POINTS: usize = 14;
}

/// Known wearable and data source identifiers
pub mod sources {
    /// Withings scales and sleep analyzers
    pub const WITHINGS: &str = "withings";
    /// WHOOP strap
    pub const WHOOP: &str = "whoop";
    /// Garmin Connect
    pub const GARMIN: &str = "garmin";
    /// Oura ring
    pub const OURA: &str = "oura";
    /// Fitbit
    pub const FITBIT: &str = "fitbit";
    /// Terra aggregation API
    pub const TERRA: &str = "terra";
    /// Apple Health export
    pub const APPLE_HEALTH: &str = "apple_health";
    /// Manual user entry
    pub const MANUAL: &str = "manual";

    /// Default source ranking, highest priority first
    pub const DEFAULT_RANKING: &[&str] = &[
        WITHINGS,
        WHOOP,
        GARMIN,
        OURA,
        FITBIT,
        TERRA,
        APPLE_HEALTH,
        MANUAL,
    ];
}

/// Canonical metric names with built-in alias sets or fallbacks
pub mod metric_names {
    /// Body weight
    pub const WEIGHT: &str = "Weight";
    /// Body fat percentage
    pub const BODY_FAT: &str = "Body Fat Percentage";
    /// Recovery / readiness score
    pub const RECOVERY_SCORE: &str = "Recovery Score";
    /// Resting heart rate
    pub const RESTING_HEART_RATE: &str = "Resting Heart Rate";
    /// Heart rate variability
    pub const HRV: &str = "HRV";
    /// Maximum heart rate
    pub const MAX_HEART_RATE: &str = "Max Heart Rate";
    /// Total sleep duration
    pub const SLEEP_DURATION: &str = "Sleep Duration";
    /// Daily step count
    pub const STEPS: &str = "Steps";
    /// `VO2max` estimate
    pub const VO2_MAX: &str = "VO2 Max";

    /// Daily summary field feeding the max heart rate fallback
    pub const SUMMARY_MAX_HR: &str = "max_hr";
}

/// Environment variable names read by configuration
pub mod env_config {
    /// Lookback window in days
    pub const LOOKBACK_DAYS: &str = "HEALTHSYNC_LOOKBACK_DAYS";
    /// Comma-separated source ranking
    pub const SOURCE_RANKING: &str = "HEALTHSYNC_SOURCE_RANKING";
    /// Path to a JSON alias table
    pub const ALIAS_FILE: &str = "HEALTHSYNC_ALIAS_FILE";
    /// Observation cache TTL in seconds
    pub const CACHE_TTL_SECS: &str = "HEALTHSYNC_CACHE_TTL_SECS";
    /// Observation cache capacity
    pub const CACHE_MAX_ENTRIES: &str = "HEALTHSYNC_CACHE_MAX_ENTRIES";
    /// Metric store database URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
}

/// Metric store database defaults
pub mod database {
    /// Default database URL when none is configured
    pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
}

/// Service names for logging
pub mod service_names {
    /// Service name reported in structured logs
    pub const HEALTHSYNC: &str = "healthsync";
    /// Metric store collaborator name used in errors
    pub const METRIC_STORE: &str = "metric_store";
    /// Daily summary collaborator name used in errors
    pub const DAILY_SUMMARY: &str = "daily_summary";
}
