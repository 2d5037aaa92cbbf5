// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    MONDAY, UnreachableStore, create_test_engine, create_test_snapshot, single,
};
use crate::{
    ApiError, ErrorResponse, SuggestionResponse, ValidationRequest, suggest_for_request,
    validate_request,
};
use bloc_planning::{Proposal, REST_TIME, SUPERVISION, Snapshot};
use bloc_planning_domain::{Assignment, Severity, ShiftPeriod, SuggestedAction, ValidationResult};
use time::macros::date;

#[test]
fn test_business_failures_are_results_not_errors() {
    let snapshot: Snapshot = create_test_snapshot();

    let result: ValidationResult =
        validate_request(&snapshot, &create_test_engine(), &single("dupont", ShiftPeriod::Morning))
            .unwrap();

    assert!(!result.valid);
    assert!(result.has_rule(REST_TIME));
}

#[test]
fn test_unsupervised_intern_is_a_warning() {
    let snapshot: Snapshot = create_test_snapshot();

    let result: ValidationResult =
        validate_request(&snapshot, &create_test_engine(), &single("durand", ShiftPeriod::Morning))
            .unwrap();

    assert!(result.valid);
    let warnings: Vec<Severity> = result.by_rule(SUPERVISION).map(|v| v.severity).collect();
    assert_eq!(warnings, vec![Severity::Warning]);
}

#[test]
fn test_proposal_outside_window_is_rejected() {
    let snapshot: Snapshot = create_test_snapshot();
    let mut request: ValidationRequest = single("senior", ShiftPeriod::Morning);
    request.window_start = date!(2025 - 07 - 08);

    let err: ApiError = validate_request(&snapshot, &create_test_engine(), &request).unwrap_err();

    assert_eq!(err.http_status(), 400);
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "proposal"));
}

#[test]
fn test_inverted_window_is_rejected() {
    let snapshot: Snapshot = create_test_snapshot();
    let mut request: ValidationRequest = single("senior", ShiftPeriod::Morning);
    request.window_end = date!(2025 - 07 - 01);

    let err: ApiError = validate_request(&snapshot, &create_test_engine(), &request).unwrap_err();

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("window"),
            message: String::from("Window ends (2025-07-01) before it starts (2025-07-07)"),
        }
    );
}

#[test]
fn test_malformed_batch_is_rejected() {
    let snapshot: Snapshot = create_test_snapshot();
    let mut request: ValidationRequest = single("senior", ShiftPeriod::Morning);
    request.proposal = Proposal::Batch(vec![
        Assignment::new("dup", "senior", "ROOM-A", MONDAY, ShiftPeriod::Morning),
        Assignment::new("dup", "durand", "ROOM-A", MONDAY, ShiftPeriod::Morning),
    ]);

    let err: ApiError = validate_request(&snapshot, &create_test_engine(), &request).unwrap_err();

    assert_eq!(err.code(), "InvalidInput");
    assert!(err.to_string().contains("'dup' appears more than once"));
}

#[test]
fn test_unreachable_store_is_service_unavailable() {
    let err: ApiError = validate_request(
        &UnreachableStore,
        &create_test_engine(),
        &single("senior", ShiftPeriod::Morning),
    )
    .unwrap_err();

    assert_eq!(
        err,
        ApiError::SnapshotUnavailable {
            message: String::from("connection refused"),
        }
    );
    let body: ErrorResponse = ErrorResponse::from(&err);
    assert_eq!(body.status, 503);
    assert_eq!(body.code, "SnapshotUnavailable");
}

#[test]
fn test_suggestions_accompany_blocking_violations() {
    let snapshot: Snapshot = create_test_snapshot();

    let response: SuggestionResponse = suggest_for_request(
        &snapshot,
        &create_test_engine(),
        &single("dupont", ShiftPeriod::Morning),
    )
    .unwrap();

    assert!(!response.result.valid);
    assert_eq!(response.alternatives.len(), 1);
    assert_eq!(response.alternatives[0].violation.rule_id, REST_TIME);
    assert_eq!(
        response.alternatives[0].suggestions[0].action,
        SuggestedAction::MoveToSlot {
            date: MONDAY,
            shift_period: ShiftPeriod::Afternoon,
            resource_id: None,
        }
    );
}

#[test]
fn test_request_json_shape() {
    let json: &str = r#"{
        "proposal": {
            "id": "a-1",
            "staffId": "durand",
            "resourceId": "ROOM-A",
            "date": "2025-07-07",
            "shiftPeriod": "MORNING"
        },
        "windowStart": "2025-07-07",
        "windowEnd": "2025-07-13"
    }"#;

    let request: ValidationRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request, single("durand", ShiftPeriod::Morning));
}
