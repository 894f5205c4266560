// ABOUTME: In-memory observation cache with LRU eviction and TTL expiry around any MetricStore
// ABOUTME: Successful fetches are cached; failures always reach the caller and are never cached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::NaiveDate;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::CacheKey;
use crate::config::ObservationCacheConfig;
use crate::models::{DailySummaryEntry, DateRange, Observation};
use crate::providers::{DailySummaryStore, MetricStore, StoreResult};

/// Cached fetch result with expiration
#[derive(Debug, Clone)]
struct CacheEntry {
    observations: Vec<Observation>,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(observations: Vec<Observation>, ttl: Duration) -> Self {
        Self {
            observations,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Metric store decorator caching fetch results for a short freshness window
///
/// `LruCache` bounds memory by evicting least-recently-used fetches; expired
/// entries are dropped lazily on lookup.
pub struct CachedMetricStore<S> {
    inner: S,
    entries: Arc<RwLock<LruCache<CacheKey, CacheEntry>>>,
    ttl: Duration,
}

impl<S> CachedMetricStore<S> {
    /// Capacity used when configuration specifies zero entries
    const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Wrap `inner` using configured TTL and capacity
    #[must_use]
    pub fn new(inner: S, config: &ObservationCacheConfig) -> Self {
        Self::with_ttl(
            inner,
            Duration::from_secs(config.ttl_secs),
            config.max_entries,
        )
    }

    /// Wrap `inner` with an explicit TTL and capacity
    #[must_use]
    pub fn with_ttl(inner: S, ttl: Duration, max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(Self::DEFAULT_CACHE_CAPACITY);
        Self {
            inner,
            entries: Arc::new(RwLock::new(LruCache::new(capacity))),
            ttl,
        }
    }

    /// Wrapped store
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Drop every cached fetch for `user_id`, returning how many were removed
    pub async fn invalidate_user(&self, user_id: Uuid) -> usize {
        let mut entries = self.entries.write().await;
        let stale: Vec<CacheKey> = entries
            .iter()
            .filter(|(key, _)| key.user_id == user_id)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            entries.pop(key);
        }
        drop(entries);
        if !stale.is_empty() {
            debug!(%user_id, removed = stale.len(), "Invalidated cached observations");
        }
        stale.len()
    }

    /// Drop every cached fetch
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of cached fetches, including any not yet evicted after expiry
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no fetches
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Fresh cached observations for `key`, evicting the entry if it expired
    async fn lookup(&self, key: &CacheKey) -> Option<Vec<Observation>> {
        let mut entries = self.entries.write().await;
        // LruCache::get is mutable (updates access order for LRU)
        let hit = match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.pop(key);
                None
            }
            Some(entry) => Some(entry.observations.clone()),
            None => None,
        };
        drop(entries);
        hit
    }
}

#[async_trait]
impl<S: MetricStore> MetricStore for CachedMetricStore<S> {
    async fn fetch(
        &self,
        user_id: Uuid,
        metric_names: &[String],
        range: &DateRange,
    ) -> StoreResult<Vec<Observation>> {
        let key = CacheKey::new(user_id, metric_names, *range);
        if let Some(observations) = self.lookup(&key).await {
            debug!(cache_key = %key, "Observation cache hit");
            return Ok(observations);
        }

        let observations = self.inner.fetch(user_id, metric_names, range).await?;
        debug!(cache_key = %key, count = observations.len(), "Observation cache miss");
        self.entries
            .write()
            .await
            .push(key, CacheEntry::new(observations.clone(), self.ttl));
        Ok(observations)
    }
}

#[async_trait]
impl<S: DailySummaryStore> DailySummaryStore for CachedMetricStore<S> {
    async fn fetch_daily_summary(
        &self,
        user_id: Uuid,
        dates: &[NaiveDate],
    ) -> StoreResult<Vec<DailySummaryEntry>> {
        self.inner.fetch_daily_summary(user_id, dates).await
    }
}
