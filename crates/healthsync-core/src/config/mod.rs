// ABOUTME: Configuration types shared across the workspace
// ABOUTME: Contains ReconciliationConfig and the observation cache settings it carries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment-driven reconciliation, cache, and store configuration
pub mod reconciliation;

pub use reconciliation::{ObservationCacheConfig, ReconciliationConfig};
