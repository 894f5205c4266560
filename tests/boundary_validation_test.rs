// ABOUTME: Integration tests for boundary validation of raw store and import rows
// ABOUTME: Covers the missing-field default policy, accepted date formats, and numeric strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{NaiveDate, TimeZone, Utc};
use healthsync::providers::boundary::{
    parse_measurement_date, parse_value, validate_observations, validate_summaries,
    RawDailySummary, RawObservation,
};
use serde_json::json;

fn complete_row() -> RawObservation {
    RawObservation {
        metric_name: Some("Weight".to_owned()),
        source: Some("Withings".to_owned()),
        value: Some(json!(80.5)),
        unit: Some("kg".to_owned()),
        measurement_date: Some("2025-05-30T07:15:00Z".to_owned()),
        priority: Some(1),
        confidence_score: Some(0.95),
    }
}

#[test]
fn test_complete_row_validates() {
    let observation = complete_row().validate().unwrap();
    assert_eq!(observation.metric_name, "Weight");
    assert_eq!(observation.source.as_str(), "withings");
    assert!((observation.value - 80.5).abs() < f64::EPSILON);
    assert_eq!(
        observation.measurement_date,
        Utc.with_ymd_and_hms(2025, 5, 30, 7, 15, 0).unwrap()
    );
    assert_eq!(observation.priority, Some(1));
    assert_eq!(observation.confidence_score, Some(0.95));
}

#[test]
fn test_validation_borrows_the_row() {
    let row = RawObservation {
        metric_name: Some("  Weight ".to_owned()),
        ..complete_row()
    };

    let first = row.validate().unwrap();
    let second = row.validate().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.metric_name, "Weight");
    assert_eq!(row.metric_name.as_deref(), Some("  Weight "));
    assert_eq!(row.unit.as_deref(), Some("kg"));
}

#[test]
fn test_required_fields_drop_row() {
    let cases = [
        RawObservation {
            metric_name: None,
            ..complete_row()
        },
        RawObservation {
            metric_name: Some("   ".to_owned()),
            ..complete_row()
        },
        RawObservation {
            source: None,
            ..complete_row()
        },
        RawObservation {
            value: None,
            ..complete_row()
        },
        RawObservation {
            value: Some(json!("heavy")),
            ..complete_row()
        },
        RawObservation {
            measurement_date: Some("yesterday".to_owned()),
            ..complete_row()
        },
    ];
    for row in cases {
        assert!(row.validate().is_none(), "{row:?}");
    }
}

#[test]
fn test_optional_fields_take_defaults() {
    let observation = RawObservation {
        unit: None,
        priority: Some(i64::from(i32::MAX) + 1),
        confidence_score: Some(f64::NAN),
        ..complete_row()
    }
    .validate()
    .unwrap();

    assert_eq!(observation.unit, "");
    assert_eq!(observation.priority, None);
    assert_eq!(observation.confidence_score, None);
}

#[test]
fn test_confidence_is_clamped() {
    let high = RawObservation {
        confidence_score: Some(1.7),
        ..complete_row()
    }
    .validate()
    .unwrap();
    assert_eq!(high.confidence_score, Some(1.0));

    let low = RawObservation {
        confidence_score: Some(-0.2),
        ..complete_row()
    }
    .validate()
    .unwrap();
    assert_eq!(low.confidence_score, Some(0.0));
}

#[test]
fn test_numeric_strings_are_values() {
    assert_eq!(parse_value(&json!("72.5")), Some(72.5));
    assert_eq!(parse_value(&json!(" 60 ")), Some(60.0));
    assert_eq!(parse_value(&json!(12)), Some(12.0));
    assert_eq!(parse_value(&json!(null)), None);
    assert_eq!(parse_value(&json!(true)), None);
    assert_eq!(parse_value(&json!("NaN")), None);
}

#[test]
fn test_measurement_date_formats() {
    let expected = Utc.with_ymd_and_hms(2025, 5, 30, 7, 15, 0).unwrap();
    assert_eq!(parse_measurement_date("2025-05-30T07:15:00Z"), Some(expected));
    assert_eq!(
        parse_measurement_date("2025-05-30T09:15:00+02:00"),
        Some(expected)
    );
    assert_eq!(parse_measurement_date("2025-05-30 07:15:00"), Some(expected));
    assert_eq!(parse_measurement_date("2025-05-30T07:15:00"), Some(expected));
    assert_eq!(parse_measurement_date("2025-05-30 07:15"), Some(expected));
    assert_eq!(
        parse_measurement_date("2025-05-30"),
        Some(Utc.with_ymd_and_hms(2025, 5, 30, 0, 0, 0).unwrap())
    );
    assert_eq!(parse_measurement_date("30/05/2025"), None);
}

#[test]
fn test_camel_case_rows_deserialize() {
    let row: RawObservation = serde_json::from_value(json!({
        "metricName": "HRV",
        "source": "whoop",
        "value": "58",
        "measurementDate": "2025-05-31T06:00:00Z",
        "confidenceScore": 0.7
    }))
    .unwrap();

    let observation = row.validate().unwrap();
    assert_eq!(observation.metric_name, "HRV");
    assert!((observation.value - 58.0).abs() < f64::EPSILON);
    assert_eq!(observation.confidence_score, Some(0.7));
}

#[test]
fn test_batch_validation_keeps_good_rows_in_order() {
    let rows = vec![
        complete_row(),
        RawObservation::default(),
        RawObservation {
            metric_name: Some("Body Mass".to_owned()),
            ..complete_row()
        },
    ];

    let observations = validate_observations(rows);

    assert_eq!(observations.len(), 2);
    assert_eq!(observations[0].metric_name, "Weight");
    assert_eq!(observations[1].metric_name, "Body Mass");
}

#[test]
fn test_summary_validation() {
    let rows = vec![
        RawDailySummary {
            metric: Some("max_hr".to_owned()),
            value: Some(json!(184)),
            date: Some("2025-05-31".to_owned()),
        },
        RawDailySummary {
            metric: Some("max_hr".to_owned()),
            value: Some(json!("181")),
            date: Some("2025-05-30T00:00:00Z".to_owned()),
        },
        RawDailySummary {
            metric: None,
            value: Some(json!(1)),
            date: Some("2025-05-30".to_owned()),
        },
        RawDailySummary {
            metric: Some("max_hr".to_owned()),
            value: Some(json!(180)),
            date: None,
        },
    ];

    let summaries = validate_summaries(rows);

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].date, NaiveDate::from_ymd_opt(2025, 5, 31).unwrap());
    assert_eq!(summaries[1].date, NaiveDate::from_ymd_opt(2025, 5, 30).unwrap());
    assert!((summaries[1].value - 181.0).abs() < f64::EPSILON);
}
