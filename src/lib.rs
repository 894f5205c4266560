// ABOUTME: Main library entry point for the HealthSync metric reconciliation platform
// ABOUTME: Wires stores, caching, reconciliation context, and the unified metrics service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # HealthSync
//!
//! Reconciles health observations reported by several wearables (Withings,
//! WHOOP, Garmin, Oura, Terra, ...) into one display value per canonical
//! metric, with a per-source breakdown, trend direction, and sparkline.
//!
//! ## Architecture
//!
//! - **`healthsync-core`**: errors, constants, models, configuration
//! - **`healthsync-intelligence`**: alias resolution, source ranking,
//!   reconciliation, fallbacks, trend summaries (pure computation)
//! - **`healthsync-providers`**: metric store traits, boundary validation,
//!   in-memory and SQLite stores
//! - **this crate**: observation cache, reconciliation context, unified
//!   metrics service, logging, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use healthsync::context::ReconciliationContext;
//! use healthsync::providers::InMemoryMetricStore;
//! use healthsync::services::UnifiedMetricsService;
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! # async fn example() -> healthsync::errors::AppResult<()> {
//! let store = Arc::new(InMemoryMetricStore::new());
//! let service = UnifiedMetricsService::new(
//!     ReconciliationContext::default(),
//!     store.clone(),
//!     store,
//! );
//! let outcomes = service.load(Uuid::new_v4(), &["Weight", "HRV"]).await;
//! for (metric, outcome) in outcomes {
//!     println!("{metric}: {outcome:?}");
//! }
//! # Ok(())
//! # }
//! ```

// Re-export workspace crates so binaries and tests have a single import root
pub use healthsync_core::{config, constants, errors, models};
pub use healthsync_intelligence as intelligence;
pub use healthsync_providers as providers;

/// Short-lived observation cache in front of a metric store
pub mod cache;

/// Explicitly constructed reconciliation dependencies
pub mod context;

/// Logging configuration and structured logging setup
pub mod logging;

/// Unified metrics service combining fetch, fallback, reconciliation, and summaries
pub mod services;
