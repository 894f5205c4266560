// ABOUTME: Integration tests for the observation cache in front of a metric store
// ABOUTME: Verifies hits, key normalization, TTL expiry, LRU eviction, invalidation, and uncached failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use async_trait::async_trait;
use common::{days_ago, hours_ago, init_test_logging, obs, week_window};
use healthsync::cache::CachedMetricStore;
use healthsync::config::ObservationCacheConfig;
use healthsync::constants::service_names;
use healthsync::models::{DateRange, Observation};
use healthsync::providers::{InMemoryMetricStore, MetricStore, StoreError, StoreResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

/// Store that counts fetches and can be switched into failure
#[derive(Default)]
struct CountingStore {
    inner: InMemoryMetricStore,
    fetches: AtomicUsize,
    failing: AtomicBool,
}

impl CountingStore {
    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricStore for CountingStore {
    async fn fetch(
        &self,
        user_id: Uuid,
        metric_names: &[String],
        range: &DateRange,
    ) -> StoreResult<Vec<Observation>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(
                service_names::METRIC_STORE,
                "connection refused",
            ));
        }
        self.inner.fetch(user_id, metric_names, range).await
    }
}

fn weight_names() -> Vec<String> {
    vec!["Weight".to_owned(), "Body Weight".to_owned()]
}

async fn seeded(user: Uuid) -> CountingStore {
    init_test_logging();
    let store = CountingStore::default();
    store
        .inner
        .insert_many(
            user,
            [
                obs("Weight", "withings", 80.0, hours_ago(2)),
                obs("Body Weight", "garmin", 80.4, days_ago(1)),
            ],
        )
        .await;
    store
}

#[tokio::test]
async fn test_repeated_fetch_is_served_from_cache() {
    let user = Uuid::new_v4();
    let cache = CachedMetricStore::new(seeded(user).await, &ObservationCacheConfig::default());

    let first = cache.fetch(user, &weight_names(), &week_window()).await.unwrap();
    let second = cache.fetch(user, &weight_names(), &week_window()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(cache.inner().fetches(), 1);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_name_order_does_not_change_key() {
    let user = Uuid::new_v4();
    let cache = CachedMetricStore::new(seeded(user).await, &ObservationCacheConfig::default());
    let mut reversed = weight_names();
    reversed.reverse();

    cache.fetch(user, &weight_names(), &week_window()).await.unwrap();
    cache.fetch(user, &reversed, &week_window()).await.unwrap();

    assert_eq!(cache.inner().fetches(), 1);
}

#[tokio::test]
async fn test_distinct_windows_and_users_are_separate_entries() {
    let user = Uuid::new_v4();
    let cache = CachedMetricStore::new(seeded(user).await, &ObservationCacheConfig::default());
    let narrow = DateRange::new(days_ago(1), week_window().end).unwrap();

    cache.fetch(user, &weight_names(), &week_window()).await.unwrap();
    cache.fetch(user, &weight_names(), &narrow).await.unwrap();
    cache
        .fetch(Uuid::new_v4(), &weight_names(), &week_window())
        .await
        .unwrap();

    assert_eq!(cache.inner().fetches(), 3);
    assert_eq!(cache.len().await, 3);
}

#[tokio::test]
async fn test_expired_entries_are_refetched() {
    let user = Uuid::new_v4();
    let cache = CachedMetricStore::with_ttl(seeded(user).await, Duration::from_millis(30), 10);

    cache.fetch(user, &weight_names(), &week_window()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;
    cache.fetch(user, &weight_names(), &week_window()).await.unwrap();

    assert_eq!(cache.inner().fetches(), 2);
}

#[tokio::test]
async fn test_least_recently_used_entry_is_evicted() {
    let user = Uuid::new_v4();
    let cache = CachedMetricStore::with_ttl(seeded(user).await, Duration::from_secs(60), 2);
    let steps = vec!["Steps".to_owned()];
    let hrv = vec!["HRV".to_owned()];

    cache.fetch(user, &weight_names(), &week_window()).await.unwrap();
    cache.fetch(user, &steps, &week_window()).await.unwrap();
    // Touch weight so steps becomes least recently used
    cache.fetch(user, &weight_names(), &week_window()).await.unwrap();
    cache.fetch(user, &hrv, &week_window()).await.unwrap();
    assert_eq!(cache.inner().fetches(), 3);

    cache.fetch(user, &weight_names(), &week_window()).await.unwrap();
    assert_eq!(cache.inner().fetches(), 3);
    cache.fetch(user, &steps, &week_window()).await.unwrap();
    assert_eq!(cache.inner().fetches(), 4);
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let user = Uuid::new_v4();
    let cache = CachedMetricStore::new(seeded(user).await, &ObservationCacheConfig::default());

    cache.inner().failing.store(true, Ordering::SeqCst);
    let err = cache
        .fetch(user, &weight_names(), &week_window())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Unavailable { .. }));
    assert!(cache.is_empty().await);

    cache.inner().failing.store(false, Ordering::SeqCst);
    let recovered = cache.fetch(user, &weight_names(), &week_window()).await.unwrap();
    assert_eq!(recovered.len(), 2);
    assert_eq!(cache.inner().fetches(), 2);
}

#[tokio::test]
async fn test_invalidate_user_and_clear() {
    let user = Uuid::new_v4();
    let other = Uuid::new_v4();
    let cache = CachedMetricStore::new(seeded(user).await, &ObservationCacheConfig::default());

    cache.fetch(user, &weight_names(), &week_window()).await.unwrap();
    cache.fetch(user, &["Steps".to_owned()], &week_window()).await.unwrap();
    cache.fetch(other, &weight_names(), &week_window()).await.unwrap();

    assert_eq!(cache.invalidate_user(user).await, 2);
    assert_eq!(cache.len().await, 1);

    cache.fetch(user, &weight_names(), &week_window()).await.unwrap();
    assert_eq!(cache.inner().fetches(), 4);

    cache.clear().await;
    assert!(cache.is_empty().await);
}
