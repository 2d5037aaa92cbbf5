// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Built-in planning rules.
//!
//! Each rule is an independent predicate over the proposal and the
//! effective plan. Rules never fail: missing reference data is reported as
//! an `UNKNOWN` violation for the affected assignment only.

mod consecutive_days;
mod custom;
mod double_booking;
mod guard_interval;
mod leave_conflict;
mod minimum_staffing;
mod qualification;
mod rest_time;
mod supervision;
mod weekly_hours;

pub use consecutive_days::ConsecutiveDaysRule;
pub use custom::CustomRule;
pub use double_booking::DoubleBookingRule;
pub use guard_interval::GuardIntervalRule;
pub use leave_conflict::LeaveConflictRule;
pub use minimum_staffing::MinimumStaffingRule;
pub use qualification::QualificationRule;
pub use rest_time::RestTimeRule;
pub use supervision::SupervisionRule;
pub use weekly_hours::WeeklyHoursRule;

use crate::config::EngineConfig;
use crate::plan::PlanView;
use crate::proposal::Proposal;
use crate::snapshot::Snapshot;
use bloc_planning_domain::{Assignment, Severity, Slot, StaffId, Violation, overlaps};

/// Rule id of [`DoubleBookingRule`].
pub const DOUBLE_BOOKING: &str = "double-booking";
/// Rule id of [`LeaveConflictRule`].
pub const LEAVE_CONFLICT: &str = "leave-conflict";
/// Rule id of [`QualificationRule`].
pub const QUALIFICATION: &str = "qualification";
/// Rule id of [`RestTimeRule`].
pub const REST_TIME: &str = "rest-time";
/// Rule id of [`SupervisionRule`].
pub const SUPERVISION: &str = "supervision";
/// Rule id of [`WeeklyHoursRule`].
pub const WEEKLY_HOURS: &str = "weekly-hours";
/// Rule id of [`GuardIntervalRule`].
pub const GUARD_INTERVAL: &str = "guard-interval";
/// Rule id of [`ConsecutiveDaysRule`].
pub const CONSECUTIVE_DAYS: &str = "consecutive-days";
/// Rule id of [`MinimumStaffingRule`].
pub const MINIMUM_STAFFING: &str = "minimum-staffing";

/// Rule categories, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleCategory {
    /// Same staff member on overlapping slots.
    DoubleBooking,
    /// Assignment during approved leave.
    LeaveConflict,
    /// Skill or specialty requirements.
    Skill,
    /// Minimum rest after nights and guards.
    RestTime,
    /// Interns need a senior.
    Supervision,
    /// Weekly hours, guard spacing and consecutive days.
    Workload,
    /// Sector staffing minimum.
    StaffingMinimum,
    /// Declarative rules supplied as data.
    Custom,
}

impl RuleCategory {
    /// Converts this category to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DoubleBooking => "double-booking",
            Self::LeaveConflict => "leave-conflict",
            Self::Skill => "skill",
            Self::RestTime => "rest-time",
            Self::Supervision => "supervision",
            Self::Workload => "workload",
            Self::StaffingMinimum => "staffing-minimum",
            Self::Custom => "custom",
        }
    }
}

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// The change under validation.
    pub proposal: &'a Proposal,
    /// Reference data.
    pub snapshot: &'a Snapshot,
    /// The plan with the proposal applied.
    pub plan: &'a PlanView,
    /// Engine configuration.
    pub config: &'a EngineConfig,
}

impl EvaluationContext<'_> {
    /// Whether the staff member could take `slot`: not on leave that day
    /// and holding nothing overlapping it.
    #[must_use]
    pub fn is_available(&self, staff_id: &StaffId, slot: Slot) -> bool {
        !self.snapshot.is_on_leave(staff_id, slot.date)
            && self
                .plan
                .staff_around(staff_id, slot.date, 1)
                .iter()
                .all(|a| !overlaps(a.slot(), slot))
    }
}

/// A single, independently testable planning rule.
pub trait Rule: Send + Sync {
    /// Identifier reported in violations.
    fn id(&self) -> &str;

    /// Category, which fixes the evaluation order.
    fn category(&self) -> RuleCategory;

    /// Evaluates the rule. An empty result means the rule passes.
    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Vec<Violation>;
}

/// The violation raised when reference data needed by a rule is missing.
pub(crate) fn unknown(rule_id: &str, subject: &Assignment, missing: &str) -> Violation {
    Violation::new(
        rule_id,
        Severity::Unknown,
        format!(
            "{missing} not found, rule could not be evaluated for assignment {}",
            subject.id
        ),
    )
    .affecting(subject.id.value())
}
