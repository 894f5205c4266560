// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for healthsync-cli
// ABOUTME: Renders metric outcomes as JSON documents for stdout

use healthsync::services::MetricOutcome;
use serde_json::{json, Value};

/// Render outcomes in request order
pub fn outcomes_to_json(outcomes: &[(String, MetricOutcome)]) -> Value {
    Value::Array(
        outcomes
            .iter()
            .map(|(metric, outcome)| outcome_to_json(metric, outcome))
            .collect(),
    )
}

fn outcome_to_json(metric: &str, outcome: &MetricOutcome) -> Value {
    match outcome {
        MetricOutcome::Ready(unified) => json!({
            "metric": metric,
            "status": "ready",
            "result": unified,
        }),
        MetricOutcome::NoData => json!({
            "metric": metric,
            "status": "no_data",
        }),
        MetricOutcome::Unavailable(error) => json!({
            "metric": metric,
            "status": "unavailable",
            "error": {
                "code": error.code,
                "message": error.message,
            },
        }),
    }
}
