// ABOUTME: Metric store collaborators feeding the reconciler with observation snapshots
// ABOUTME: Store traits, validated boundary types, and in-memory and SQLite implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Metric store implementations and core abstractions.
//!
//! Every row crossing into the workspace passes through the `boundary`
//! module, which applies one documented "missing field → default" policy and
//! drops malformed observations instead of failing the whole fetch.

// Re-export healthsync-core modules so store code can keep `use crate::models::*`
pub use healthsync_core::constants;
pub use healthsync_core::models;

/// Loosely typed rows validated into domain observations
pub mod boundary;
/// Store error taxonomy
pub mod errors;
/// In-memory store for tests and local tooling
pub mod memory;
/// SQLite-backed store
pub mod sqlite;
/// Metric store and daily summary traits
pub mod store;

pub use boundary::{RawDailySummary, RawObservation};
pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryMetricStore;
pub use sqlite::SqliteMetricStore;
pub use store::{DailySummaryStore, MetricStore};
