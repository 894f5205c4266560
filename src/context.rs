// ABOUTME: Reconciliation context bundling the resolver, ranking, reconciler, summarizer, and fallbacks
// ABOUTME: Built once at startup from configuration and handed to every call site that needs it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use tracing::warn;

use crate::config::ReconciliationConfig;
use crate::constants::reconciliation::{DEFAULT_LOOKBACK_DAYS, MAX_LOOKBACK_DAYS};
use crate::errors::ConfigError;
use crate::intelligence::{
    AliasResolver, FallbackRegistry, SourceRanking, SourceReconciler, TrendSummarizer,
};

/// Shared, read-only dependencies of the reconciliation pipeline
///
/// Cloning is cheap; every component sits behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ReconciliationContext {
    /// Per-source reconciler
    pub reconciler: Arc<SourceReconciler>,
    /// Trend and sparkline summarizer
    pub summarizer: Arc<TrendSummarizer>,
    /// Metric-specific fallbacks
    pub fallbacks: Arc<FallbackRegistry>,
    /// Days of history fetched per metric
    pub lookback_days: i64,
}

impl Default for ReconciliationContext {
    fn default() -> Self {
        Self::new(
            AliasResolver::default(),
            SourceRanking::default(),
            FallbackRegistry::with_builtin(),
            DEFAULT_LOOKBACK_DAYS,
        )
    }
}

impl ReconciliationContext {
    /// Assemble a context from its parts
    ///
    /// `lookback_days` is clamped to `1..=MAX_LOOKBACK_DAYS`.
    #[must_use]
    pub fn new(
        aliases: AliasResolver,
        ranking: SourceRanking,
        fallbacks: FallbackRegistry,
        lookback_days: i64,
    ) -> Self {
        let clamped = lookback_days.clamp(1, MAX_LOOKBACK_DAYS);
        if clamped != lookback_days {
            warn!(
                requested = lookback_days,
                used = clamped,
                "Lookback window out of range, clamping"
            );
        }
        let aliases = Arc::new(aliases);
        Self {
            reconciler: Arc::new(SourceReconciler::new(Arc::clone(&aliases), ranking)),
            summarizer: Arc::new(TrendSummarizer::new(aliases)),
            fallbacks: Arc::new(fallbacks),
            lookback_days: clamped,
        }
    }

    /// Build the context described by configuration, with built-in fallbacks
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the alias file cannot be loaded or the ranking
    /// repeats a source
    pub fn from_config(config: &ReconciliationConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            AliasResolver::from_config(config)?,
            SourceRanking::from_config(config)?,
            FallbackRegistry::with_builtin(),
            config.lookback_days,
        ))
    }

    /// Alias resolver shared by the reconciler and summarizer
    #[must_use]
    pub fn aliases(&self) -> &AliasResolver {
        self.reconciler.aliases()
    }
}
