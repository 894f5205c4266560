// ABOUTME: Source ranking used as the authoritative tie-break between sources on equal dates
// ABOUTME: Exactly one position per known source; unknown sources rank below every known one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::constants::sources::DEFAULT_RANKING;
use crate::errors::ConfigError;
use crate::models::SourceId;
use healthsync_core::config::ReconciliationConfig;

/// Total order over known source identifiers, best first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRanking {
    order: Vec<SourceId>,
    positions: HashMap<SourceId, usize>,
}

impl Default for SourceRanking {
    fn default() -> Self {
        let order: Vec<SourceId> = DEFAULT_RANKING.iter().map(|s| SourceId::new(s)).collect();
        let positions = order
            .iter()
            .enumerate()
            .map(|(index, id)| (id.clone(), index))
            .collect();
        Self { order, positions }
    }
}

impl SourceRanking {
    /// Build a ranking from source names, highest priority first
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateSource` if a source (after
    /// normalization) appears more than once
    pub fn new<I, S>(sources: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut order = Vec::new();
        let mut positions = HashMap::new();
        for raw in sources {
            let id = SourceId::new(raw);
            if positions.contains_key(&id) {
                return Err(ConfigError::DuplicateSource(id.to_string()));
            }
            positions.insert(id.clone(), order.len());
            order.push(id);
        }
        Ok(Self { order, positions })
    }

    /// Build the ranking named by configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateSource` if the configured order repeats a source
    pub fn from_config(config: &ReconciliationConfig) -> Result<Self, ConfigError> {
        Self::new(&config.source_ranking)
    }

    /// Zero-based position; unknown sources share the lowest rank
    #[must_use]
    pub fn rank(&self, source: &SourceId) -> usize {
        self.positions
            .get(source)
            .copied()
            .unwrap_or(self.order.len())
    }

    /// Whether `source` has an explicit position
    #[must_use]
    pub fn is_known(&self, source: &SourceId) -> bool {
        self.positions.contains_key(source)
    }

    /// Order two sources, better ranked first
    #[must_use]
    pub fn compare(&self, a: &SourceId, b: &SourceId) -> Ordering {
        self.rank(a).cmp(&self.rank(b))
    }

    /// Known sources, best first
    #[must_use]
    pub fn order(&self) -> &[SourceId] {
        &self.order
    }
}
