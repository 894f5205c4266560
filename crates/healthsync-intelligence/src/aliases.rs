// ABOUTME: Alias resolver mapping canonical metric names to the raw names accepted as evidence
// ABOUTME: Closed equivalence sets; unknown canonical names resolve to themselves only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::constants::metric_names::{
    BODY_FAT, HRV, MAX_HEART_RATE, RECOVERY_SCORE, RESTING_HEART_RATE, SLEEP_DURATION, STEPS,
    VO2_MAX, WEIGHT,
};
use crate::errors::ConfigError;
use healthsync_core::config::ReconciliationConfig;

/// Built-in equivalence sets, canonical name first
const BUILTIN_ALIASES: &[(&str, &[&str])] = &[
    (WEIGHT, &["Body Weight", "Body Mass"]),
    (BODY_FAT, &["Body Fat %", "Fat Ratio", "Body Fat"]),
    (
        RECOVERY_SCORE,
        &["Training Readiness", "Readiness Score", "Body Battery"],
    ),
    (RESTING_HEART_RATE, &["Resting HR", "RHR"]),
    (HRV, &["HRV (RMSSD)", "Heart Rate Variability", "HRV RMSSD"]),
    (MAX_HEART_RATE, &["Max HR", "Maximum Heart Rate"]),
    (SLEEP_DURATION, &["Total Sleep", "Time Asleep", "Sleep Time"]),
    (STEPS, &["Step Count", "Daily Steps"]),
    (VO2_MAX, &["VO2max", "Cardio Fitness Score"]),
];

/// Resolves a canonical metric to the closed set of raw names that satisfy it
///
/// Matching is exact on the raw name. A resolver is built once at startup
/// and shared; it carries no hidden global tables.
#[derive(Debug, Clone)]
pub struct AliasResolver {
    table: HashMap<String, BTreeSet<String>>,
}

impl Default for AliasResolver {
    fn default() -> Self {
        Self::new(BUILTIN_ALIASES.iter().map(|(canonical, raw)| {
            (
                (*canonical).to_owned(),
                raw.iter().map(|name| (*name).to_owned()).collect::<Vec<_>>(),
            )
        }))
    }
}

impl AliasResolver {
    /// Build a resolver from `(canonical, raw names)` pairs
    ///
    /// Each set always includes its canonical name. Repeated canonical
    /// entries are merged.
    #[must_use]
    pub fn new<I, R>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, R)>,
        R: IntoIterator<Item = String>,
    {
        let mut table: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (canonical, raw_names) in entries {
            let set = table.entry(canonical.clone()).or_default();
            set.insert(canonical);
            set.extend(raw_names);
        }
        Self { table }
    }

    /// Build a resolver from configuration
    ///
    /// A configured alias file replaces the built-in table entirely.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the alias file cannot be read or parsed
    pub fn from_config(config: &ReconciliationConfig) -> Result<Self, ConfigError> {
        Ok(config
            .load_alias_table()?
            .map_or_else(Self::default, |table: BTreeMap<String, Vec<String>>| {
                Self::new(table)
            }))
    }

    /// Raw names accepted as evidence for `canonical`, always including `canonical`
    #[must_use]
    pub fn resolve(&self, canonical: &str) -> BTreeSet<String> {
        self.table
            .get(canonical)
            .cloned()
            .unwrap_or_else(|| BTreeSet::from([canonical.to_owned()]))
    }

    /// Whether `raw` is accepted as evidence for `canonical`
    #[must_use]
    pub fn matches(&self, canonical: &str, raw: &str) -> bool {
        self.table
            .get(canonical)
            .map_or(raw == canonical, |set| set.contains(raw))
    }

    /// Every raw name across the given canonical metrics, deduplicated
    ///
    /// Used to build a single store query for several metrics.
    #[must_use]
    pub fn resolve_all<'a, I>(&self, canonical_names: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        canonical_names
            .into_iter()
            .flat_map(|name| self.resolve(name))
            .collect()
    }

    /// Canonical names with an explicit alias set, sorted
    #[must_use]
    pub fn canonical_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
