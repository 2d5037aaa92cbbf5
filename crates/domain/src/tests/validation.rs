// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Assignment, DomainError, Leave, LeaveStatus, LeaveType, ShiftPeriod, StaffId,
    validate_assignment_fields, validate_date_window, validate_leave_request,
    validate_unique_assignment_ids,
};
use time::Date;
use time::macros::date;

fn create_test_assignment(id: &str) -> Assignment {
    Assignment::new(
        id,
        "dupont",
        "ROOM-A",
        date!(2025 - 07 - 07),
        ShiftPeriod::Morning,
    )
}

fn create_approved_leave(id: &str, staff: &str, start: Date, end: Date) -> Leave {
    Leave::new(id, StaffId::new(staff), start, end, LeaveType::Annual)
        .unwrap()
        .transition(LeaveStatus::Approved)
        .unwrap()
}

#[test]
fn test_validate_assignment_fields_accepts_valid_assignment() {
    let result: Result<(), DomainError> = validate_assignment_fields(&create_test_assignment("a-1"));

    assert!(result.is_ok());
}

#[test]
fn test_validate_assignment_fields_rejects_empty_staff() {
    let mut assignment: Assignment = create_test_assignment("a-1");
    assignment.staff_id = StaffId::new(" ");

    let result: Result<(), DomainError> = validate_assignment_fields(&assignment);

    assert!(matches!(
        result,
        Err(DomainError::InvalidIdentifier { kind: "staff", .. })
    ));
}

#[test]
fn test_validate_assignment_fields_rejects_implausible_year() {
    let mut assignment: Assignment = create_test_assignment("a-1");
    assignment.date = date!(1850 - 01 - 01);

    let result: Result<(), DomainError> = validate_assignment_fields(&assignment);

    assert!(matches!(result, Err(DomainError::DateOutOfRange { .. })));
}

#[test]
fn test_validate_date_window_rejects_inverted_window() {
    let result: Result<(), DomainError> =
        validate_date_window(date!(2025 - 07 - 07), date!(2025 - 07 - 01));

    assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
}

#[test]
fn test_validate_date_window_accepts_single_day() {
    assert!(validate_date_window(date!(2025 - 07 - 07), date!(2025 - 07 - 07)).is_ok());
}

#[test]
fn test_validate_unique_assignment_ids() {
    let batch: Vec<Assignment> = vec![
        create_test_assignment("a-1"),
        create_test_assignment("a-2"),
        create_test_assignment("a-1"),
    ];

    let result: Result<(), DomainError> = validate_unique_assignment_ids(&batch);

    assert_eq!(
        result,
        Err(DomainError::DuplicateAssignmentId(String::from("a-1")))
    );
}

#[test]
fn test_validate_leave_request_rejects_overlap_with_approved() {
    let existing: Vec<Leave> = vec![create_approved_leave(
        "l-1",
        "dupont",
        date!(2025 - 07 - 01),
        date!(2025 - 07 - 07),
    )];
    let candidate: Leave = Leave::new(
        "l-2",
        StaffId::new("dupont"),
        date!(2025 - 07 - 07),
        date!(2025 - 07 - 10),
        LeaveType::Recovery,
    )
    .unwrap();

    let result: Result<(), DomainError> = validate_leave_request(&candidate, &existing);

    assert!(matches!(result, Err(DomainError::OverlappingLeave { .. })));
}

#[test]
fn test_validate_leave_request_ignores_other_staff_and_pending() {
    let mut pending: Leave = create_approved_leave(
        "l-1",
        "dupont",
        date!(2025 - 07 - 01),
        date!(2025 - 07 - 07),
    );
    pending.status = LeaveStatus::Pending;
    let existing: Vec<Leave> = vec![
        pending,
        create_approved_leave("l-3", "martin", date!(2025 - 07 - 01), date!(2025 - 07 - 07)),
    ];
    let candidate: Leave = Leave::new(
        "l-2",
        StaffId::new("dupont"),
        date!(2025 - 07 - 03),
        date!(2025 - 07 - 04),
        LeaveType::Training,
    )
    .unwrap();

    assert!(validate_leave_request(&candidate, &existing).is_ok());
}

#[test]
fn test_validate_leave_request_ignores_itself() {
    let leave: Leave = create_approved_leave(
        "l-1",
        "dupont",
        date!(2025 - 07 - 01),
        date!(2025 - 07 - 07),
    );

    assert!(validate_leave_request(&leave, std::slice::from_ref(&leave)).is_ok());
}
