// ABOUTME: SQLite metric store serving observations and daily summaries through sqlx
// ABOUTME: Rows are read loosely typed and validated at the boundary so bad rows never abort a fetch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! SQLite database implementation of the metric store.
//!
//! Timestamps are stored as RFC 3339 text in UTC with second precision, so
//! range filters compare lexicographically.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Row, Sqlite};
use std::str::FromStr;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::boundary::{validate_observations, validate_summaries, RawDailySummary, RawObservation};
use crate::constants::service_names;
use crate::errors::{StoreError, StoreResult};
use crate::models::{DailySummaryEntry, DateRange, Observation};
use crate::store::{DailySummaryStore, MetricStore};

/// Connections used for file-backed databases
const FILE_POOL_MAX_CONNECTIONS: u32 = 5;

/// Format used for stored summary dates
const SUMMARY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Encode a timestamp the way it is stored
fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// SQLite-backed metric store
#[derive(Debug, Clone)]
pub struct SqliteMetricStore {
    pool: SqlitePool,
}

impl SqliteMetricStore {
    /// Connect to `database_url` and create the schema if needed
    ///
    /// In-memory databases use a single connection so every query sees the
    /// same database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the URL is invalid, the connection
    /// fails, or the schema cannot be created
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let max_connections = if database_url.contains(":memory:") {
            1
        } else {
            FILE_POOL_MAX_CONNECTIONS
        };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if a statement fails
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS health_metrics (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                metric_name TEXT,
                source TEXT,
                value REAL,
                unit TEXT,
                measurement_date TEXT,
                priority INTEGER,
                confidence_score REAL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_health_metrics_user_metric_date
                ON health_metrics (user_id, metric_name, measurement_date)
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS daily_summaries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                summary_date TEXT,
                metric TEXT,
                value REAL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_daily_summaries_user_date
                ON daily_summaries (user_id, summary_date)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert one observation
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the insert fails
    pub async fn insert_observation(
        &self,
        user_id: Uuid,
        observation: &Observation,
    ) -> StoreResult<()> {
        sqlx::query(
            r"
            INSERT INTO health_metrics
                (user_id, metric_name, source, value, unit, measurement_date, priority, confidence_score)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(user_id.to_string())
        .bind(&observation.metric_name)
        .bind(observation.source.as_str())
        .bind(observation.value)
        .bind(&observation.unit)
        .bind(encode_timestamp(observation.measurement_date))
        .bind(observation.priority)
        .bind(observation.confidence_score)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert several observations in one transaction
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if any insert fails; nothing is written then
    pub async fn insert_observations(
        &self,
        user_id: Uuid,
        observations: &[Observation],
    ) -> StoreResult<usize> {
        let mut tx = self.pool.begin().await?;
        for observation in observations {
            sqlx::query(
                r"
                INSERT INTO health_metrics
                    (user_id, metric_name, source, value, unit, measurement_date, priority, confidence_score)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(user_id.to_string())
            .bind(&observation.metric_name)
            .bind(observation.source.as_str())
            .bind(observation.value)
            .bind(&observation.unit)
            .bind(encode_timestamp(observation.measurement_date))
            .bind(observation.priority)
            .bind(observation.confidence_score)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(observations.len())
    }

    /// Insert one daily summary entry
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the insert fails
    pub async fn insert_daily_summary(
        &self,
        user_id: Uuid,
        entry: &DailySummaryEntry,
    ) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO daily_summaries (user_id, summary_date, metric, value) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id.to_string())
        .bind(entry.date.format(SUMMARY_DATE_FORMAT).to_string())
        .bind(&entry.metric)
        .bind(entry.value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl MetricStore for SqliteMetricStore {
    #[instrument(skip(self, metric_names), fields(names = metric_names.len()))]
    async fn fetch(
        &self,
        user_id: Uuid,
        metric_names: &[String],
        range: &DateRange,
    ) -> StoreResult<Vec<Observation>> {
        if metric_names.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT metric_name, source, value, unit, measurement_date, priority, confidence_score \
             FROM health_metrics WHERE user_id = ",
        );
        query.push_bind(user_id.to_string());
        query.push(" AND measurement_date >= ");
        query.push_bind(encode_timestamp(range.start));
        query.push(" AND measurement_date <= ");
        query.push_bind(encode_timestamp(range.end));
        query.push(" AND metric_name IN (");
        let mut names = query.separated(", ");
        for name in metric_names {
            names.push_bind(name.clone());
        }
        names.push_unseparated(") ORDER BY id");

        let rows = query.build().fetch_all(&self.pool).await?;

        let mut raw = Vec::with_capacity(rows.len());
        for row in rows {
            raw.push(RawObservation {
                metric_name: row.try_get("metric_name")?,
                source: row.try_get("source")?,
                value: row.try_get::<Option<f64>, _>("value")?.map(Value::from),
                unit: row.try_get("unit")?,
                measurement_date: row.try_get("measurement_date")?,
                priority: row.try_get("priority")?,
                confidence_score: row.try_get("confidence_score")?,
            });
        }

        let observations = validate_observations(raw);
        debug!(count = observations.len(), "Fetched observations");
        Ok(observations)
    }
}

#[async_trait]
impl DailySummaryStore for SqliteMetricStore {
    #[instrument(skip(self, dates), fields(days = dates.len()))]
    async fn fetch_daily_summary(
        &self,
        user_id: Uuid,
        dates: &[NaiveDate],
    ) -> StoreResult<Vec<DailySummaryEntry>> {
        if dates.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT metric, value, summary_date FROM daily_summaries WHERE user_id = ",
        );
        query.push_bind(user_id.to_string());
        query.push(" AND summary_date IN (");
        let mut days = query.separated(", ");
        for date in dates {
            days.push_bind(date.format(SUMMARY_DATE_FORMAT).to_string());
        }
        days.push_unseparated(") ORDER BY id");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(service_names::DAILY_SUMMARY, e))?;

        let mut raw = Vec::with_capacity(rows.len());
        for row in rows {
            raw.push(RawDailySummary {
                metric: row.try_get("metric")?,
                value: row.try_get::<Option<f64>, _>("value")?.map(Value::from),
                date: row.try_get("summary_date")?,
            });
        }
        Ok(validate_summaries(raw))
    }
}
