// ABOUTME: Core types and constants for the HealthSync metric reconciliation platform
// ABOUTME: Foundation crate with error handling, observation models, constants, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # HealthSync Core
//!
//! Foundation crate providing shared types and constants for multi-source
//! health metric reconciliation. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Reconciliation, trend, cache, and source constants
//! - **models**: Observations, source identifiers, windows, and reconciled projections
//! - **config**: Environment-driven reconciliation configuration

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Observation, `SourceId`, `DateRange`, reconciled values)
pub mod models;

/// Environment-driven configuration for reconciliation and caching
pub mod config;
