// ABOUTME: Unified error type and error codes shared across the HealthSync workspace
// ABOUTME: Maps store, configuration, and internal failures to stable codes and statuses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Absence of data is never an error in this workspace: an empty window is an
//! empty result. `AppError` covers the failures that must reach the caller,
//! chiefly upstream fetch failures from the Metric Store.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller supplied invalid input
    InvalidInput = 3000,

    // External Services (5000-5999)
    /// Upstream collaborator could not be reached
    ExternalServiceUnavailable = 5001,

    // Configuration (6000-6999)
    /// Configuration value is invalid
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Database operation failed
    DatabaseError = 9001,
    /// Serialization or deserialization failed
    SerializationError = 9003,
}

impl ErrorCode {
    /// HTTP-equivalent status for this error, used by UI-facing callers
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::ExternalServiceUnavailable => 502,
            Self::ConfigInvalid | Self::DatabaseError | Self::SerializationError => 500,
        }
    }

    /// User-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::DatabaseError => "Database operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Unified error type for the workspace
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid caller input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Upstream collaborator (metric store, summary feed) unavailable
    #[must_use]
    pub fn external_unavailable(service: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{service}: {}", message.into()),
        )
    }

    /// Database failure
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration failure
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// HTTP-equivalent status code
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable held a value that could not be parsed
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Environment variable name
        key: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A source appeared more than once in a ranking
    #[error("Duplicate source in ranking: {0}")]
    DuplicateSource(String),

    /// Alias file could not be read
    #[error("Failed to read alias file {path}: {source}")]
    AliasFile {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Alias file was not valid JSON of the expected shape
    #[error("Failed to parse alias file: {0}")]
    AliasParse(#[from] serde_json::Error),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string()).with_source(error)
    }
}
