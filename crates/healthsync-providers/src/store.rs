// ABOUTME: Metric store and daily summary traits consumed by the unified metrics service
// ABOUTME: Async fetch contracts; implementations return validated domain types only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::StoreResult;
use crate::models::{DailySummaryEntry, DateRange, Observation};

/// Tabular store of time-stamped observations
#[async_trait]
pub trait MetricStore: Send + Sync {
    /// Observations for `user_id` whose raw metric name is in `metric_names`
    /// and whose measurement date falls inside `range`
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be queried. Malformed rows are
    /// dropped, not reported.
    async fn fetch(
        &self,
        user_id: Uuid,
        metric_names: &[String],
        range: &DateRange,
    ) -> StoreResult<Vec<Observation>>;
}

/// Secondary per-day summary feed used by fallbacks
#[async_trait]
pub trait DailySummaryStore: Send + Sync {
    /// Summary entries for `user_id` on each of `dates`
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the feed cannot be queried
    async fn fetch_daily_summary(
        &self,
        user_id: Uuid,
        dates: &[NaiveDate],
    ) -> StoreResult<Vec<DailySummaryEntry>>;
}

#[async_trait]
impl<T: MetricStore + ?Sized> MetricStore for Arc<T> {
    async fn fetch(
        &self,
        user_id: Uuid,
        metric_names: &[String],
        range: &DateRange,
    ) -> StoreResult<Vec<Observation>> {
        (**self).fetch(user_id, metric_names, range).await
    }
}

#[async_trait]
impl<T: DailySummaryStore + ?Sized> DailySummaryStore for Arc<T> {
    async fn fetch_daily_summary(
        &self,
        user_id: Uuid,
        dates: &[NaiveDate],
    ) -> StoreResult<Vec<DailySummaryEntry>> {
        (**self).fetch_daily_summary(user_id, dates).await
    }
}
