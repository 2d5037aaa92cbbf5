// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Assignment, AssignmentId, Leave, LeaveStatus};
use std::collections::HashSet;
use time::Date;

/// Validates that an assignment's basic field constraints are met.
///
/// This does NOT evaluate business rules; those live in the rule engine.
///
/// # Errors
///
/// Returns an error if:
/// - The assignment, staff or resource identifier is empty
/// - The date's year is outside 1900-2200
pub fn validate_assignment_fields(assignment: &Assignment) -> Result<(), DomainError> {
    if assignment.id.is_empty() {
        return Err(DomainError::InvalidIdentifier {
            kind: "assignment",
            value: assignment.id.value().to_string(),
        });
    }

    if assignment.staff_id.is_empty() {
        return Err(DomainError::InvalidIdentifier {
            kind: "staff",
            value: assignment.staff_id.value().to_string(),
        });
    }

    if assignment.resource_id.is_empty() {
        return Err(DomainError::InvalidIdentifier {
            kind: "resource",
            value: assignment.resource_id.value().to_string(),
        });
    }

    validate_planning_date(assignment.date)
}

/// Validates that a date lies in a plausible planning year.
///
/// # Errors
///
/// Returns an error if the year is not between 1900 and 2200.
pub fn validate_planning_date(date: Date) -> Result<(), DomainError> {
    if !(1900..=2200).contains(&date.year()) {
        return Err(DomainError::DateOutOfRange { date });
    }
    Ok(())
}

/// Validates an inclusive date window.
///
/// # Errors
///
/// Returns an error if `end` is before `start` or either bound is outside
/// the supported planning years.
pub fn validate_date_window(start: Date, end: Date) -> Result<(), DomainError> {
    validate_planning_date(start)?;
    validate_planning_date(end)?;
    if end < start {
        return Err(DomainError::InvalidDateRange { start, end });
    }
    Ok(())
}

/// Validates that assignment ids are unique within one proposal.
///
/// # Errors
///
/// Returns an error naming the first repeated id.
pub fn validate_unique_assignment_ids(assignments: &[Assignment]) -> Result<(), DomainError> {
    let mut seen: HashSet<&AssignmentId> = HashSet::new();
    for assignment in assignments {
        if !seen.insert(&assignment.id) {
            return Err(DomainError::DuplicateAssignmentId(
                assignment.id.value().to_string(),
            ));
        }
    }
    Ok(())
}

/// Validates a leave request against the staff member's existing leaves.
///
/// Two approved leaves of the same staff member must never overlap. The
/// candidate is compared against every approved leave of the same staff
/// member other than itself.
///
/// # Errors
///
/// Returns an error if:
/// - The leave ends before it starts
/// - The leave overlaps another approved leave of the same staff member
pub fn validate_leave_request(leave: &Leave, existing: &[Leave]) -> Result<(), DomainError> {
    validate_date_window(leave.start_date, leave.end_date)?;

    let conflicting: Option<&Leave> = existing.iter().find(|other| {
        other.id != leave.id
            && other.staff_id == leave.staff_id
            && other.status == LeaveStatus::Approved
            && other.overlaps_range(leave.start_date, leave.end_date)
    });

    if let Some(other) = conflicting {
        return Err(DomainError::OverlappingLeave {
            staff_id: leave.staff_id.value().to_string(),
            existing_leave_id: other.id.clone(),
        });
    }

    Ok(())
}
