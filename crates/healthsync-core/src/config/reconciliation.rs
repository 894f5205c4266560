// ABOUTME: Reconciliation configuration loaded from environment variables with validated defaults
// ABOUTME: Covers lookback window, source ranking order, alias table file, cache, and database URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-only configuration. Values are read once at startup and the
//! resulting objects are passed to the components that need them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

use crate::constants::{cache, database, env_config, reconciliation, sources};
use crate::errors::ConfigError;

/// Observation cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationCacheConfig {
    /// Freshness window for fetched observations, in seconds
    pub ttl_secs: u64,
    /// Maximum cached fetches
    pub max_entries: usize,
}

impl Default for ObservationCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: cache::TTL_OBSERVATIONS_SECS,
            max_entries: cache::DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

/// Top-level reconciliation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// Days of history fetched per canonical metric
    pub lookback_days: i64,
    /// Source identifiers, highest priority first
    pub source_ranking: Vec<String>,
    /// Optional JSON alias table overriding the built-in one
    pub alias_file: Option<PathBuf>,
    /// Observation cache settings
    pub cache: ObservationCacheConfig,
    /// Metric store database URL
    pub database_url: String,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            lookback_days: reconciliation::DEFAULT_LOOKBACK_DAYS,
            source_ranking: sources::DEFAULT_RANKING
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            alias_file: None,
            cache: ObservationCacheConfig::default(),
            database_url: database::DEFAULT_DATABASE_URL.to_owned(),
        }
    }
}

impl ReconciliationConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable or
    /// out-of-range value, or if the ranking names a source twice
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let lookback_days = parse_env(env_config::LOOKBACK_DAYS, defaults.lookback_days)?;
        if !(1..=reconciliation::MAX_LOOKBACK_DAYS).contains(&lookback_days) {
            return Err(ConfigError::InvalidValue {
                key: env_config::LOOKBACK_DAYS,
                reason: format!(
                    "must be between 1 and {}",
                    reconciliation::MAX_LOOKBACK_DAYS
                ),
            });
        }

        let source_ranking = match env::var(env_config::SOURCE_RANKING) {
            Ok(raw) => parse_ranking(&raw)?,
            Err(_) => defaults.source_ranking,
        };

        let ttl_secs = parse_env(env_config::CACHE_TTL_SECS, defaults.cache.ttl_secs)?;
        let max_entries = parse_env(env_config::CACHE_MAX_ENTRIES, defaults.cache.max_entries)?;

        Ok(Self {
            lookback_days,
            source_ranking,
            alias_file: env::var(env_config::ALIAS_FILE)
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            cache: ObservationCacheConfig {
                ttl_secs,
                max_entries,
            },
            database_url: env::var(env_config::DATABASE_URL)
                .unwrap_or(defaults.database_url),
        })
    }

    /// Read the configured alias table, if any
    ///
    /// The file holds a JSON object mapping each canonical metric name to the
    /// raw names accepted for it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed
    pub fn load_alias_table(&self) -> Result<Option<BTreeMap<String, Vec<String>>>, ConfigError> {
        let Some(path) = &self.alias_file else {
            return Ok(None);
        };
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::AliasFile {
            path: path.display().to_string(),
            source,
        })?;
        let table: BTreeMap<String, Vec<String>> = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), metrics = table.len(), "Loaded alias table");
        Ok(Some(table))
    }
}

/// Parse an optional environment variable, falling back to `default` when unset
fn parse_env<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key,
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

/// Parse a comma-separated ranking, normalizing and rejecting duplicates
fn parse_ranking(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut seen = HashSet::new();
    let mut ranking = Vec::new();
    for name in raw.split(',').map(|s| s.trim().to_lowercase()) {
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name.clone()) {
            return Err(ConfigError::DuplicateSource(name));
        }
        ranking.push(name);
    }
    if ranking.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: env_config::SOURCE_RANKING,
            reason: "ranking must name at least one source".to_owned(),
        });
    }
    Ok(ranking)
}
