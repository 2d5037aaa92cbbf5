// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors raised when planning input breaks a structural precondition.
///
/// These indicate a caller bug, never a business-rule outcome: rule
/// violations are reported as data in a `ValidationResult`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier is empty.
    InvalidIdentifier {
        /// Which identifier (e.g. "staff", "resource").
        kind: &'static str,
        /// The rejected raw value.
        value: String,
    },
    /// A range ends before it starts.
    InvalidDateRange {
        /// Start of the range.
        start: Date,
        /// End of the range.
        end: Date,
    },
    /// A date is outside the supported planning years.
    DateOutOfRange {
        /// The rejected date.
        date: Date,
    },
    /// Unknown shift period name.
    InvalidShiftPeriod(String),
    /// Unknown week parity name.
    InvalidWeekParity(String),
    /// Unknown staff role name.
    InvalidRole(String),
    /// Unknown leave type name.
    InvalidLeaveType(String),
    /// Unknown status name.
    InvalidStatus(String),
    /// A lifecycle transition is not permitted.
    InvalidTransition {
        /// The entity kind whose lifecycle was violated.
        entity: &'static str,
        /// The current state.
        from: String,
        /// The requested state.
        to: String,
    },
    /// Two approved leaves of the same staff member overlap.
    OverlappingLeave {
        /// The staff member.
        staff_id: String,
        /// The already approved leave.
        existing_leave_id: String,
    },
    /// A leave can no longer be cancelled because it has started.
    LeaveAlreadyStarted {
        /// The leave identifier.
        leave_id: String,
        /// The leave's first day.
        start_date: Date,
    },
    /// The same assignment identifier appears more than once in a proposal.
    DuplicateAssignmentId(String),
    /// A swap involves the same staff member on both sides.
    InvalidSwap(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier { kind, value } => {
                write!(f, "Invalid {kind} identifier: '{value}'")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: {end} is before {start}")
            }
            Self::DateOutOfRange { date } => {
                write!(f, "Date {date} is outside the supported planning years")
            }
            Self::InvalidShiftPeriod(value) => write!(f, "Invalid shift period: {value}"),
            Self::InvalidWeekParity(value) => write!(f, "Invalid week parity: {value}"),
            Self::InvalidRole(value) => write!(f, "Invalid staff role: {value}"),
            Self::InvalidLeaveType(value) => write!(f, "Invalid leave type: {value}"),
            Self::InvalidStatus(value) => write!(f, "Invalid status: {value}"),
            Self::InvalidTransition { entity, from, to } => {
                write!(f, "Invalid {entity} transition from {from} to {to}")
            }
            Self::OverlappingLeave {
                staff_id,
                existing_leave_id,
            } => {
                write!(
                    f,
                    "Leave for staff '{staff_id}' overlaps approved leave '{existing_leave_id}'"
                )
            }
            Self::LeaveAlreadyStarted {
                leave_id,
                start_date,
            } => {
                write!(
                    f,
                    "Leave '{leave_id}' started on {start_date} and can no longer be cancelled"
                )
            }
            Self::DuplicateAssignmentId(id) => {
                write!(f, "Assignment '{id}' appears more than once in the proposal")
            }
            Self::InvalidSwap(msg) => write!(f, "Invalid swap: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
