// ABOUTME: Integration tests for the SQLite metric store
// ABOUTME: Verifies schema creation, range and name filtering, user isolation, and malformed rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{days_ago, hours_ago, init_test_logging, obs, reference_now, week_window};
use healthsync::constants::service_names;
use healthsync::errors::{AppError, ErrorCode};
use healthsync::models::{DailySummaryEntry, DateRange, Observation};
use healthsync::providers::{DailySummaryStore, MetricStore, SqliteMetricStore, StoreError};
use uuid::Uuid;

async fn memory_store() -> SqliteMetricStore {
    init_test_logging();
    SqliteMetricStore::connect("sqlite::memory:").await.unwrap()
}

fn names(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|n| (*n).to_owned()).collect()
}

#[tokio::test]
async fn test_round_trip_preserves_optional_fields() {
    let store = memory_store().await;
    let user = Uuid::new_v4();
    let observation = Observation::new("Weight", "withings", 80.4, "kg", hours_ago(3))
        .with_priority(2)
        .with_confidence(0.9);
    store.insert_observation(user, &observation).await.unwrap();

    let fetched = store
        .fetch(user, &names(&["Weight"]), &week_window())
        .await
        .unwrap();

    assert_eq!(fetched, vec![observation]);
}

#[tokio::test]
async fn test_fetch_filters_by_name_range_and_user() {
    let store = memory_store().await;
    let user = Uuid::new_v4();
    let other_user = Uuid::new_v4();

    let inserted = store
        .insert_observations(
            user,
            &[
                obs("Weight", "withings", 80.0, days_ago(1)),
                obs("Body Weight", "garmin", 80.3, days_ago(2)),
                obs("Weight", "whoop", 82.0, days_ago(12)),
                obs("Steps", "garmin", 9000.0, days_ago(1)),
            ],
        )
        .await
        .unwrap();
    assert_eq!(inserted, 4);
    store
        .insert_observation(other_user, &obs("Weight", "oura", 70.0, days_ago(1)))
        .await
        .unwrap();

    let fetched = store
        .fetch(user, &names(&["Weight", "Body Weight"]), &week_window())
        .await
        .unwrap();

    assert_eq!(fetched.len(), 2);
    assert!(fetched
        .iter()
        .all(|o| o.metric_name == "Weight" || o.metric_name == "Body Weight"));
    assert!(fetched.iter().all(|o| o.source.as_str() != "oura"));
}

#[tokio::test]
async fn test_range_bounds_are_inclusive() {
    let store = memory_store().await;
    let user = Uuid::new_v4();
    let window = DateRange::new(days_ago(2), reference_now()).unwrap();
    store
        .insert_observations(
            user,
            &[
                obs("HRV", "whoop", 50.0, days_ago(2)),
                obs("HRV", "whoop", 55.0, reference_now()),
            ],
        )
        .await
        .unwrap();

    let fetched = store.fetch(user, &names(&["HRV"]), &window).await.unwrap();
    assert_eq!(fetched.len(), 2);
}

#[tokio::test]
async fn test_empty_name_list_returns_nothing() {
    let store = memory_store().await;
    let user = Uuid::new_v4();
    store
        .insert_observation(user, &obs("Weight", "withings", 80.0, days_ago(1)))
        .await
        .unwrap();

    let fetched = store.fetch(user, &[], &week_window()).await.unwrap();
    assert!(fetched.is_empty());
}

#[tokio::test]
async fn test_malformed_rows_are_dropped_not_fatal() {
    let store = memory_store().await;
    let user = Uuid::new_v4();
    let stamp = hours_ago(2).to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    sqlx::query(
        "INSERT INTO health_metrics (user_id, metric_name, source, value, unit, measurement_date) \
         VALUES (?, 'Weight', 'withings', NULL, 'kg', ?)",
    )
    .bind(user.to_string())
    .bind(&stamp)
    .execute(store.pool())
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO health_metrics (user_id, metric_name, source, value, unit, measurement_date) \
         VALUES (?, 'Weight', NULL, 79.0, 'kg', ?)",
    )
    .bind(user.to_string())
    .bind(&stamp)
    .execute(store.pool())
    .await
    .unwrap();
    store
        .insert_observation(user, &obs("Weight", "whoop", 81.0, hours_ago(2)))
        .await
        .unwrap();

    let fetched = store
        .fetch(user, &names(&["Weight"]), &week_window())
        .await
        .unwrap();

    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].source.as_str(), "whoop");
    assert_eq!(fetched[0].unit, "kg");
}

#[tokio::test]
async fn test_daily_summaries_by_date() {
    let store = memory_store().await;
    let user = Uuid::new_v4();
    let yesterday = days_ago(1).date_naive();
    let last_month = days_ago(30).date_naive();

    for (value, date) in [(183.0, yesterday), (190.0, last_month)] {
        store
            .insert_daily_summary(
                user,
                &DailySummaryEntry {
                    metric: "max_hr".to_owned(),
                    value,
                    date,
                },
            )
            .await
            .unwrap();
    }

    let summaries = store
        .fetch_daily_summary(user, &week_window().dates())
        .await
        .unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].date, yesterday);
    assert!((summaries[0].value - 183.0).abs() < f64::EPSILON);

    let none = store.fetch_daily_summary(user, &[]).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_file_database_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("health.db").display());
    let user = Uuid::new_v4();

    {
        let store = SqliteMetricStore::connect(&url).await.unwrap();
        store
            .insert_observation(user, &obs("Steps", "garmin", 10_500.0, hours_ago(1)))
            .await
            .unwrap();
        store.pool().close().await;
    }

    let reopened = SqliteMetricStore::connect(&url).await.unwrap();
    let fetched = reopened
        .fetch(user, &names(&["Steps"]), &week_window())
        .await
        .unwrap();
    assert_eq!(fetched.len(), 1);
}

#[tokio::test]
async fn test_closed_pool_reports_collaborator_unavailable() {
    let store = memory_store().await;
    let user = Uuid::new_v4();
    store.pool().close().await;

    let err = store
        .fetch(user, &names(&["Weight"]), &week_window())
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            StoreError::Unavailable {
                collaborator: service_names::METRIC_STORE,
                ..
            }
        ),
        "{err:?}"
    );
    let app_error = AppError::from(err);
    assert_eq!(app_error.code, ErrorCode::ExternalServiceUnavailable);
    assert!(app_error.message.starts_with("metric_store: "));

    let err = store
        .fetch_daily_summary(user, &week_window().dates())
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            StoreError::Unavailable {
                collaborator: service_names::DAILY_SUMMARY,
                ..
            }
        ),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_failed_query_is_a_database_error() {
    let store = memory_store().await;
    sqlx::query("DROP TABLE health_metrics")
        .execute(store.pool())
        .await
        .unwrap();

    let err = store
        .fetch(Uuid::new_v4(), &names(&["Weight"]), &week_window())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Database(_)), "{err:?}");

    let app_error = AppError::from(err);
    assert_eq!(app_error.code, ErrorCode::DatabaseError);
    assert_eq!(app_error.http_status(), 500);
}
