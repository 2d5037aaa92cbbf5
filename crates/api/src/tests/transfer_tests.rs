// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_ledger, create_test_planner, create_test_staff_actor, transfer,
};
use crate::{
    ApiError, DecideTransferRequest, ErrorResponse, approve_transfer, execute_transfer,
    reject_transfer, simulate_transfer,
};
use bloc_planning_domain::{LeaveType, StaffId, TransferStatus};
use bloc_planning_quota::{QuotaLedger, TransferResult, TransferSimulation};

fn decide(transfer_id: &str) -> DecideTransferRequest {
    DecideTransferRequest {
        transfer_id: transfer_id.to_string(),
        reason: None,
    }
}

#[test]
fn test_insufficient_balance_is_a_conflict() {
    let mut ledger: QuotaLedger = create_test_ledger();

    let err: ApiError = execute_transfer(
        &mut ledger,
        &transfer("dupont", LeaveType::Annual, LeaveType::Recovery, 5.0),
        create_test_staff_actor("dupont"),
    )
    .unwrap_err();

    let body: ErrorResponse = ErrorResponse::from(&err);
    assert_eq!(body.status, 409);
    assert_eq!(body.code, "InsufficientBalance");
    assert_eq!(ledger.remaining(&StaffId::new("dupont"), LeaveType::Annual), 3.0);
    assert_eq!(ledger.remaining(&StaffId::new("dupont"), LeaveType::Recovery), 4.0);
}

#[test]
fn test_missing_rule_is_unprocessable() {
    let mut ledger: QuotaLedger = create_test_ledger();

    let err: ApiError = execute_transfer(
        &mut ledger,
        &transfer("dupont", LeaveType::Annual, LeaveType::Training, 1.0),
        create_test_planner(),
    )
    .unwrap_err();

    assert_eq!(err.code(), "NoActiveRule");
    assert_eq!(err.http_status(), 422);
}

#[test]
fn test_staff_transfers_own_days() {
    let mut ledger: QuotaLedger = create_test_ledger();

    let result: TransferResult = execute_transfer(
        &mut ledger,
        &transfer("dupont", LeaveType::Annual, LeaveType::Recovery, 2.0),
        create_test_staff_actor("dupont"),
    )
    .unwrap();

    assert!(result.success);
    assert_eq!(result.source_remaining, 1.0);
    assert_eq!(result.target_total, 6.0);
    assert_eq!(ledger.audit().events()[0].cause.id, "req-42");
}

#[test]
fn test_staff_cannot_transfer_for_colleague() {
    let mut ledger: QuotaLedger = create_test_ledger();

    let err: ApiError = execute_transfer(
        &mut ledger,
        &transfer("dupont", LeaveType::Annual, LeaveType::Recovery, 1.0),
        create_test_staff_actor("martin"),
    )
    .unwrap_err();

    assert_eq!(err.http_status(), 403);
    assert!(ledger.transfers().is_empty());
}

#[test]
fn test_only_planners_decide() {
    let mut ledger: QuotaLedger = create_test_ledger();
    let pending: TransferResult = execute_transfer(
        &mut ledger,
        &transfer("dupont", LeaveType::Recovery, LeaveType::Annual, 2.0),
        create_test_staff_actor("dupont"),
    )
    .unwrap();
    assert_eq!(pending.status, TransferStatus::Pending);

    let denied: ApiError = approve_transfer(
        &mut ledger,
        &decide(&pending.transfer_id),
        create_test_staff_actor("dupont"),
    )
    .unwrap_err();
    assert_eq!(denied.code(), "Unauthorized");

    let approved: TransferResult = approve_transfer(
        &mut ledger,
        &decide(&pending.transfer_id),
        create_test_planner(),
    )
    .unwrap();
    assert_eq!(approved.status, TransferStatus::Approved);
    assert_eq!(approved.target_total, 5.0);

    let again: ApiError = reject_transfer(
        &mut ledger,
        &decide(&pending.transfer_id),
        create_test_planner(),
    )
    .unwrap_err();
    assert_eq!(again.code(), "InvalidTransition");
    assert_eq!(again.http_status(), 409);
}

#[test]
fn test_unknown_transfer_is_not_found() {
    let mut ledger: QuotaLedger = create_test_ledger();

    let err: ApiError =
        reject_transfer(&mut ledger, &decide("transfer-7"), create_test_planner()).unwrap_err();

    assert_eq!(err.http_status(), 404);
}

#[test]
fn test_simulation_through_api() {
    let ledger: QuotaLedger = create_test_ledger();

    let simulation: TransferSimulation = simulate_transfer(
        &ledger,
        &transfer("dupont", LeaveType::Recovery, LeaveType::Annual, 1.0).transfer,
        &create_test_staff_actor("dupont"),
    )
    .unwrap();

    assert!(simulation.requires_approval);
    assert_eq!(simulation.target_total_after, 4.0);
}

#[test]
fn test_staff_cannot_simulate_for_colleague() {
    let ledger: QuotaLedger = create_test_ledger();

    let err: ApiError = simulate_transfer(
        &ledger,
        &transfer("dupont", LeaveType::Annual, LeaveType::Recovery, 1.0).transfer,
        &create_test_staff_actor("durand"),
    )
    .unwrap_err();

    assert_eq!(err.http_status(), 403);
}

#[test]
fn test_transfer_request_json_is_flat() {
    let json: &str = r#"{
        "staffId": "dupont",
        "sourceType": "ANNUAL",
        "destinationType": "RECOVERY",
        "days": 5,
        "requestId": "req-42"
    }"#;

    let request: crate::ExecuteTransferRequest = serde_json::from_str(json).unwrap();

    assert_eq!(
        request,
        transfer("dupont", LeaveType::Annual, LeaveType::Recovery, 5.0)
    );
}
