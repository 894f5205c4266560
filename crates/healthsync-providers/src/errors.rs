// ABOUTME: Error taxonomy for metric store and daily summary collaborators
// ABOUTME: Converts store failures into AppError so callers can show "data unavailable"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use healthsync_core::constants::service_names;
use healthsync_core::errors::AppError;
use thiserror::Error;

/// Failures raised while fetching from a store
///
/// Missing data is not a failure; stores return an empty list instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database query failed
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Collaborator could not serve the request
    #[error("{collaborator} unavailable: {reason}")]
    Unavailable {
        /// Collaborator name
        collaborator: &'static str,
        /// Failure detail
        reason: String,
    },
}

impl StoreError {
    /// Create an unavailable error
    #[must_use]
    pub fn unavailable(collaborator: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            collaborator,
            reason: reason.into(),
        }
    }

    /// Classify a database error raised while serving `collaborator`
    ///
    /// A closed or exhausted pool means the collaborator is unreachable;
    /// everything else is a failed query.
    #[must_use]
    pub fn from_sqlx(collaborator: &'static str, error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) {
            Self::unavailable(collaborator, error.to_string())
        } else {
            Self::Database(error)
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        Self::from_sqlx(service_names::METRIC_STORE, error)
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Database(source) => {
                Self::database(format!("Database error: {source}")).with_source(source)
            }
            StoreError::Unavailable {
                collaborator,
                reason,
            } => Self::external_unavailable(collaborator, reason),
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
