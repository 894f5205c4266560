// ABOUTME: Cache-related constants for observation cache TTL and capacity
// ABOUTME: Freshness window stays in single-digit minutes so dashboards see new readings quickly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default maximum entries in the observation cache
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1_000;

/// Observation fetch cache TTL (5 minutes)
pub const TTL_OBSERVATIONS_SECS: u64 = 300;
