// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for healthsync-cli
// ABOUTME: Provides access to the reconcile and import commands

pub mod import;
pub mod reconcile;
