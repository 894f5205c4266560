// ABOUTME: Criterion benchmarks for source reconciliation and trend summaries
// ABOUTME: Measures per-metric reconcile, parallel batch reconcile, and cached store fetches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the reconciliation pipeline.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use healthsync::cache::CachedMetricStore;
use healthsync::constants::sources::DEFAULT_RANKING;
use healthsync::intelligence::{AliasResolver, SourceRanking, SourceReconciler, TrendSummarizer};
use healthsync::models::{DateRange, Observation};
use healthsync::providers::{InMemoryMetricStore, MetricStore};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use uuid::Uuid;

/// Raw names cycled through so alias matching is exercised
const RAW_NAMES: &[&str] = &["Weight", "Body Weight", "Body Mass"];

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Observations spread over sources, raw names, and the last week
#[allow(clippy::cast_possible_wrap)]
fn generate_observations(count: usize, now: DateTime<Utc>) -> Vec<Observation> {
    (0..count)
        .map(|index| {
            let source = DEFAULT_RANKING[index % DEFAULT_RANKING.len()];
            let name = RAW_NAMES[index % RAW_NAMES.len()];
            let minutes_ago = ((index * 37) % (7 * 24 * 60)) as i64;
            Observation::new(
                name,
                source,
                70.0 + (index % 50) as f64 / 10.0,
                "kg",
                now - Duration::minutes(minutes_ago),
            )
            .with_confidence(0.5 + (index % 5) as f64 / 10.0)
        })
        .collect()
}

fn reconciler() -> SourceReconciler {
    SourceReconciler::new(Arc::new(AliasResolver::default()), SourceRanking::default())
}

fn bench_reconcile(c: &mut Criterion) {
    let now = reference_time();
    let window = DateRange::last_days(now, 7);
    let reconciler = reconciler();

    let mut group = c.benchmark_group("reconcile");
    for size in [100_usize, 1_000, 10_000] {
        let observations = generate_observations(size, now);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &observations, |b, obs| {
            b.iter(|| reconciler.reconcile_at(black_box("Weight"), black_box(obs), &window, now));
        });
    }
    group.finish();
}

fn bench_reconcile_batch(c: &mut Criterion) {
    let now = reference_time();
    let window = DateRange::last_days(now, 7);
    let reconciler = reconciler();
    let observations = generate_observations(5_000, now);
    let metrics = ["Weight", "HRV", "Steps", "Recovery Score", "Sleep Duration", "VO2 Max"];
    let requests: Vec<(&str, &[Observation])> = metrics
        .iter()
        .map(|metric| (*metric, observations.as_slice()))
        .collect();

    c.bench_function("reconcile_batch_6_metrics", |b| {
        b.iter(|| reconciler.reconcile_batch(black_box(&requests), &window, now));
    });
}

fn bench_summarize(c: &mut Criterion) {
    let now = reference_time();
    let summarizer = TrendSummarizer::new(Arc::new(AliasResolver::default()));

    let mut group = c.benchmark_group("summarize");
    for size in [14_usize, 365, 5_000] {
        let observations = generate_observations(size, now);
        group.bench_with_input(BenchmarkId::from_parameter(size), &observations, |b, obs| {
            b.iter(|| summarizer.summarize(black_box("Weight"), black_box(obs)));
        });
    }
    group.finish();
}

fn bench_cached_fetch(c: &mut Criterion) {
    let Ok(runtime) = tokio::runtime::Runtime::new() else {
        return;
    };
    let now = reference_time();
    let window = DateRange::last_days(now, 7);
    let user_id = Uuid::new_v4();

    let inner = InMemoryMetricStore::new();
    runtime.block_on(inner.insert_many(user_id, generate_observations(2_000, now)));
    let store = CachedMetricStore::with_ttl(inner, StdDuration::from_secs(300), 100);
    let names: Vec<String> = RAW_NAMES.iter().map(|n| (*n).to_owned()).collect();

    c.bench_function("cached_fetch_hit", |b| {
        b.to_async(&runtime)
            .iter(|| async { store.fetch(user_id, black_box(&names), &window).await });
    });
}

criterion_group!(
    benches,
    bench_reconcile,
    bench_reconcile_batch,
    bench_summarize,
    bench_cached_fetch,
);
criterion_main!(benches);
