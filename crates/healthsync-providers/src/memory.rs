// ABOUTME: In-memory metric store and daily summary feed for tests and local tooling
// ABOUTME: Holds observations per user behind a tokio RwLock and filters them like the SQL store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::StoreResult;
use crate::models::{DailySummaryEntry, DateRange, Observation};
use crate::store::{DailySummaryStore, MetricStore};

/// Metric store backed by process memory
#[derive(Debug, Default)]
pub struct InMemoryMetricStore {
    observations: RwLock<HashMap<Uuid, Vec<Observation>>>,
    summaries: RwLock<HashMap<Uuid, Vec<DailySummaryEntry>>>,
}

impl InMemoryMetricStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation for `user_id`
    pub async fn insert(&self, user_id: Uuid, observation: Observation) {
        self.observations
            .write()
            .await
            .entry(user_id)
            .or_default()
            .push(observation);
    }

    /// Append several observations for `user_id`, preserving their order
    pub async fn insert_many<I>(&self, user_id: Uuid, observations: I)
    where
        I: IntoIterator<Item = Observation>,
    {
        self.observations
            .write()
            .await
            .entry(user_id)
            .or_default()
            .extend(observations);
    }

    /// Append one daily summary entry for `user_id`
    pub async fn insert_summary(&self, user_id: Uuid, entry: DailySummaryEntry) {
        self.summaries
            .write()
            .await
            .entry(user_id)
            .or_default()
            .push(entry);
    }
}

#[async_trait]
impl MetricStore for InMemoryMetricStore {
    async fn fetch(
        &self,
        user_id: Uuid,
        metric_names: &[String],
        range: &DateRange,
    ) -> StoreResult<Vec<Observation>> {
        let guard = self.observations.read().await;
        Ok(guard
            .get(&user_id)
            .map(|rows| {
                rows.iter()
                    .filter(|o| {
                        range.contains(o.measurement_date) && metric_names.contains(&o.metric_name)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl DailySummaryStore for InMemoryMetricStore {
    async fn fetch_daily_summary(
        &self,
        user_id: Uuid,
        dates: &[NaiveDate],
    ) -> StoreResult<Vec<DailySummaryEntry>> {
        let guard = self.summaries.read().await;
        Ok(guard
            .get(&user_id)
            .map(|rows| {
                rows.iter()
                    .filter(|entry| dates.contains(&entry.date))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
