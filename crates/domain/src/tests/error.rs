// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;
use time::macros::date;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidIdentifier {
        kind: "staff",
        value: String::new(),
    };
    assert_eq!(format!("{err}"), "Invalid staff identifier: ''");

    let err: DomainError = DomainError::InvalidDateRange {
        start: date!(2025 - 07 - 07),
        end: date!(2025 - 07 - 01),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid date range: 2025-07-01 is before 2025-07-07"
    );

    let err: DomainError = DomainError::InvalidShiftPeriod(String::from("EVENING"));
    assert_eq!(format!("{err}"), "Invalid shift period: EVENING");

    let err: DomainError = DomainError::InvalidTransition {
        entity: "leave",
        from: String::from("REJECTED"),
        to: String::from("APPROVED"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid leave transition from REJECTED to APPROVED"
    );

    let err: DomainError = DomainError::OverlappingLeave {
        staff_id: String::from("dupont"),
        existing_leave_id: String::from("l-1"),
    };
    assert_eq!(
        format!("{err}"),
        "Leave for staff 'dupont' overlaps approved leave 'l-1'"
    );

    let err: DomainError = DomainError::DuplicateAssignmentId(String::from("a-1"));
    assert_eq!(
        format!("{err}"),
        "Assignment 'a-1' appears more than once in the proposal"
    );
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> =
        Box::new(DomainError::InvalidRole(String::from("SURGEON")));

    assert_eq!(err.to_string(), "Invalid staff role: SURGEON");
}
