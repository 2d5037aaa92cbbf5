// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod error;
mod types;
mod validation;
mod violation;

#[cfg(test)]
mod tests;

pub use calendar::{
    ShiftPeriod, Slot, WeekParity, format_day_month, iso_week_dates, iso_week_key, month_bounds,
    next_permissible_slot, overlaps, rest_gap_hours, week_parity_of, working_days_between,
};
pub use error::DomainError;
pub use types::{
    Assignment, AssignmentId, AssignmentStatus, Leave, LeaveStatus, LeaveType, Resource,
    ResourceId, ResourceKind, Sector, SectorId, StaffId, StaffProfile, StaffRole, SwapRequest,
    SwapStatus, TransferStatus,
};
pub use validation::{
    validate_assignment_fields, validate_date_window, validate_leave_request,
    validate_planning_date, validate_unique_assignment_ids,
};
pub use violation::{Severity, SuggestedAction, ValidationMetrics, ValidationResult, Violation};
