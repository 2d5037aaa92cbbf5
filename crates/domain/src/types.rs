// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::{ShiftPeriod, Slot, WeekParity, format_day_month, working_days_between};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use time::Date;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, trimming surrounding whitespace.
            #[must_use]
            pub fn new(value: &str) -> Self {
                Self(value.trim().to_string())
            }

            /// Returns the identifier value.
            #[must_use]
            pub fn value(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is empty.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(&value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identifier!(
    /// Identifies an assignment.
    AssignmentId
);
identifier!(
    /// Identifies a staff member.
    StaffId
);
identifier!(
    /// Identifies an operating room or service.
    ResourceId
);
identifier!(
    /// Identifies a sector grouping several resources.
    SectorId
);

/// Professional role of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    /// Fully qualified practitioner, may supervise interns.
    Senior,
    /// Practitioner in training, must be supervised.
    Intern,
    /// Nursing staff.
    Nurse,
}

impl StaffRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Senior => "SENIOR",
            Self::Intern => "INTERN",
            Self::Nurse => "NURSE",
        }
    }

    /// Whether this role needs a senior co-assigned to the same slot.
    #[must_use]
    pub const fn requires_supervision(&self) -> bool {
        matches!(self, Self::Intern)
    }

    /// Whether this role can supervise interns.
    #[must_use]
    pub const fn provides_supervision(&self) -> bool {
        matches!(self, Self::Senior)
    }
}

impl FromStr for StaffRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SENIOR" => Ok(Self::Senior),
            "INTERN" => Ok(Self::Intern),
            "NURSE" => Ok(Self::Nurse),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A staff member's profile as supplied by the snapshot provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffProfile {
    /// The staff identifier.
    pub id: StaffId,
    /// Name used in messages.
    pub display_name: String,
    /// Professional role.
    pub role: StaffRole,
    /// Qualifications and specialties held.
    #[serde(default)]
    pub qualifications: BTreeSet<String>,
    /// Weekly hour budget. `None` falls back to the configured default.
    #[serde(default)]
    pub weekly_hour_budget: Option<u32>,
    /// Interns flagged exempt do not need a co-assigned senior.
    #[serde(default)]
    pub supervision_exempt: bool,
}

impl StaffProfile {
    /// Creates a profile with no qualifications and the default budget.
    #[must_use]
    pub fn new(id: StaffId, display_name: &str, role: StaffRole) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            role,
            qualifications: BTreeSet::new(),
            weekly_hour_budget: None,
            supervision_exempt: false,
        }
    }

    /// Adds a qualification, returning the updated profile.
    #[must_use]
    pub fn with_qualification(mut self, qualification: &str) -> Self {
        self.qualifications.insert(qualification.to_string());
        self
    }

    /// Sets the weekly hour budget, returning the updated profile.
    #[must_use]
    pub fn with_weekly_budget(mut self, hours: u32) -> Self {
        self.weekly_hour_budget = Some(hours);
        self
    }

    /// Whether the staff member holds at least one of `required`.
    ///
    /// An empty requirement list is always satisfied.
    #[must_use]
    pub fn has_any_qualification(&self, required: &[String]) -> bool {
        required.is_empty() || required.iter().any(|q| self.qualifications.contains(q))
    }
}

/// Kind of schedulable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    /// An operating room.
    #[default]
    OperatingRoom,
    /// A hospital service (e.g. emergency, recovery).
    Service,
    /// A consultation slot.
    Consultation,
}

/// An operating room or service staff can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// The resource identifier.
    pub id: ResourceId,
    /// Display name.
    pub name: String,
    /// The sector this resource belongs to.
    pub sector_id: SectorId,
    /// The resource kind.
    #[serde(default)]
    pub kind: ResourceKind,
    /// Staff must hold at least one of these to be assigned.
    #[serde(default)]
    pub required_qualifications: Vec<String>,
}

impl Resource {
    /// Creates an operating room without qualification requirements.
    #[must_use]
    pub fn new(id: ResourceId, name: &str, sector_id: SectorId) -> Self {
        Self {
            id,
            name: name.to_string(),
            sector_id,
            kind: ResourceKind::OperatingRoom,
            required_qualifications: Vec::new(),
        }
    }

    /// Adds a required qualification, returning the updated resource.
    #[must_use]
    pub fn requiring(mut self, qualification: &str) -> Self {
        self.required_qualifications.push(qualification.to_string());
        self
    }
}

/// A group of resources sharing a staffing minimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    /// The sector identifier.
    pub id: SectorId,
    /// Display name.
    pub name: String,
    /// Minimum staff assigned per period across the sector's resources.
    pub minimum_staff: u32,
}

impl Sector {
    /// Creates a new `Sector`.
    #[must_use]
    pub fn new(id: SectorId, name: &str, minimum_staff: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            minimum_staff,
        }
    }
}

/// Lifecycle state of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    /// Created by a planner, not yet submitted.
    #[default]
    Draft,
    /// Submitted for validation.
    Proposed,
    /// Validated and committed.
    Confirmed,
}

impl AssignmentStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Proposed => "PROPOSED",
            Self::Confirmed => "CONFIRMED",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Draft → Proposed
    /// - Draft → Confirmed
    /// - Proposed → Confirmed
    /// - Proposed → Draft
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Proposed | Self::Confirmed)
                | (Self::Proposed, Self::Confirmed | Self::Draft)
        )
    }

    /// Whether assignments in this status hold their slot.
    #[must_use]
    pub const fn occupies_slot(&self) -> bool {
        matches!(self, Self::Proposed | Self::Confirmed)
    }
}

impl FromStr for AssignmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "PROPOSED" => Ok(Self::Proposed),
            "CONFIRMED" => Ok(Self::Confirmed),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

/// A binding of one staff member to one resource over a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// The assignment identifier.
    pub id: AssignmentId,
    /// The assigned staff member.
    pub staff_id: StaffId,
    /// The room or service.
    pub resource_id: ResourceId,
    /// The planning date.
    pub date: Date,
    /// The shift period on that date.
    pub shift_period: ShiftPeriod,
    /// Weeks the assignment applies to.
    #[serde(default)]
    pub week_parity: WeekParity,
    /// Optional activity label, e.g. "complex surgery".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_kind: Option<String>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: AssignmentStatus,
}

impl Assignment {
    /// Creates a proposed assignment applying to every week.
    #[must_use]
    pub fn new(
        id: &str,
        staff_id: &str,
        resource_id: &str,
        date: Date,
        shift_period: ShiftPeriod,
    ) -> Self {
        Self {
            id: AssignmentId::new(id),
            staff_id: StaffId::new(staff_id),
            resource_id: ResourceId::new(resource_id),
            date,
            shift_period,
            week_parity: WeekParity::All,
            activity_kind: None,
            status: AssignmentStatus::Proposed,
        }
    }

    /// Sets the status, returning the updated assignment.
    #[must_use]
    pub fn with_status(mut self, status: AssignmentStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the activity kind, returning the updated assignment.
    #[must_use]
    pub fn with_activity(mut self, activity_kind: &str) -> Self {
        self.activity_kind = Some(activity_kind.to_string());
        self
    }

    /// The (date, period) slot.
    #[must_use]
    pub const fn slot(&self) -> Slot {
        Slot::new(self.date, self.shift_period)
    }

    /// Hours counted toward weekly totals.
    #[must_use]
    pub const fn hours(&self) -> u32 {
        self.shift_period.duration_hours()
    }

    /// Whether the assignment holds its slot: its status occupies a slot
    /// and its week parity matches its date.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.occupies_slot() && self.week_parity.matches(self.date)
    }
}

/// Kind of leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    /// Paid annual leave.
    Annual,
    /// Recovery days earned from guards and overtime.
    Recovery,
    /// Training.
    Training,
    /// Sick leave.
    Sick,
    /// Maternity or parental leave.
    Maternity,
    /// Special leave (family events).
    Special,
    /// Unpaid leave.
    Unpaid,
    /// Anything else.
    Other,
}

impl LeaveType {
    /// Converts this leave type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "ANNUAL",
            Self::Recovery => "RECOVERY",
            Self::Training => "TRAINING",
            Self::Sick => "SICK",
            Self::Maternity => "MATERNITY",
            Self::Special => "SPECIAL",
            Self::Unpaid => "UNPAID",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for LeaveType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ANNUAL" => Ok(Self::Annual),
            "RECOVERY" => Ok(Self::Recovery),
            "TRAINING" => Ok(Self::Training),
            "SICK" => Ok(Self::Sick),
            "MATERNITY" => Ok(Self::Maternity),
            "SPECIAL" => Ok(Self::Special),
            "UNPAID" => Ok(Self::Unpaid),
            "OTHER" => Ok(Self::Other),
            _ => Err(DomainError::InvalidLeaveType(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Approved by an approver.
    Approved,
    /// Rejected by an approver.
    Rejected,
    /// Withdrawn by the requester.
    Cancelled,
}

impl LeaveStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Cancelling an approved leave additionally requires that it has not
    /// started, see [`Leave::cancel`].
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Pending,
                Self::Approved | Self::Rejected | Self::Cancelled
            ) | (Self::Approved, Self::Cancelled)
        )
    }
}

/// A leave request over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    /// The leave identifier.
    pub id: String,
    /// The staff member on leave.
    pub staff_id: StaffId,
    /// First day of leave.
    pub start_date: Date,
    /// Last day of leave (inclusive).
    pub end_date: Date,
    /// The leave type.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// Lifecycle status.
    #[serde(default)]
    pub status: LeaveStatus,
    /// Working days in the range, weekends excluded.
    #[serde(default)]
    pub counted_days: u32,
}

impl Leave {
    /// Creates a pending leave, computing its counted working days.
    ///
    /// # Errors
    ///
    /// Returns an error if `end_date` is before `start_date`.
    pub fn new(
        id: &str,
        staff_id: StaffId,
        start_date: Date,
        end_date: Date,
        leave_type: LeaveType,
    ) -> Result<Self, DomainError> {
        if end_date < start_date {
            return Err(DomainError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Self {
            id: id.to_string(),
            staff_id,
            start_date,
            end_date,
            leave_type,
            status: LeaveStatus::Pending,
            counted_days: working_days_between(start_date, end_date, &[]),
        })
    }

    /// Moves the leave to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the lifecycle does not allow the transition.
    pub fn transition(&self, target: LeaveStatus) -> Result<Self, DomainError> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidTransition {
                entity: "leave",
                from: self.status.as_str().to_string(),
                to: target.as_str().to_string(),
            });
        }
        let mut updated: Self = self.clone();
        updated.status = target;
        Ok(updated)
    }

    /// Cancels the leave on behalf of its requester.
    ///
    /// Approved leaves can only be cancelled before their first day.
    ///
    /// # Errors
    ///
    /// Returns an error if the leave is not pending or approved, or if an
    /// approved leave has already started on `today`.
    pub fn cancel(&self, today: Date) -> Result<Self, DomainError> {
        if self.status == LeaveStatus::Approved && !self.can_cancel(today) {
            return Err(DomainError::LeaveAlreadyStarted {
                leave_id: self.id.clone(),
                start_date: self.start_date,
            });
        }
        self.transition(LeaveStatus::Cancelled)
    }

    /// Whether the requester may still cancel the leave on `today`.
    #[must_use]
    pub fn can_cancel(&self, today: Date) -> bool {
        match self.status {
            LeaveStatus::Pending => true,
            LeaveStatus::Approved => today < self.start_date,
            LeaveStatus::Rejected | LeaveStatus::Cancelled => false,
        }
    }

    /// Whether `date` falls inside the leave.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether the leave intersects the inclusive range `[start, end]`.
    #[must_use]
    pub fn overlaps_range(&self, start: Date, end: Date) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    /// `dd/mm to dd/mm` label used in messages.
    #[must_use]
    pub fn range_label(&self) -> String {
        format!(
            "{} to {}",
            format_day_month(self.start_date),
            format_day_month(self.end_date)
        )
    }
}

/// Lifecycle state of a two-party swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapStatus {
    /// Waiting for the counterpart's answer.
    #[default]
    Pending,
    /// Accepted by the counterpart.
    Accepted,
    /// Rejected by the counterpart.
    Rejected,
    /// Withdrawn by the initiator.
    Cancelled,
}

impl SwapStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Only pending swaps can move, and only once.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Pending,
                Self::Accepted | Self::Rejected | Self::Cancelled
            )
        )
    }
}

/// A request to exchange two assignments between their owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    /// The request identifier.
    pub id: String,
    /// The staff member asking for the swap.
    pub initiator_id: StaffId,
    /// The assignment the initiator gives away.
    pub initiator_assignment_id: AssignmentId,
    /// The staff member asked to swap.
    pub counterpart_id: StaffId,
    /// The assignment the counterpart gives away.
    pub counterpart_assignment_id: AssignmentId,
    /// Lifecycle status.
    #[serde(default)]
    pub status: SwapStatus,
}

impl SwapRequest {
    /// Creates a pending swap request.
    ///
    /// # Errors
    ///
    /// Returns an error if both sides belong to the same staff member or
    /// reference the same assignment.
    pub fn new(id: &str, initiator: &Assignment, counterpart: &Assignment) -> Result<Self, DomainError> {
        if initiator.staff_id == counterpart.staff_id {
            return Err(DomainError::InvalidSwap(format!(
                "both assignments belong to '{}'",
                initiator.staff_id
            )));
        }
        if initiator.id == counterpart.id {
            return Err(DomainError::InvalidSwap(format!(
                "assignment '{}' cannot be swapped with itself",
                initiator.id
            )));
        }

        Ok(Self {
            id: id.to_string(),
            initiator_id: initiator.staff_id.clone(),
            initiator_assignment_id: initiator.id.clone(),
            counterpart_id: counterpart.staff_id.clone(),
            counterpart_assignment_id: counterpart.id.clone(),
            status: SwapStatus::Pending,
        })
    }

    /// Moves the request to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is no longer pending.
    pub fn transition(&self, target: SwapStatus) -> Result<Self, DomainError> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidTransition {
                entity: "swap",
                from: self.status.as_str().to_string(),
                to: target.as_str().to_string(),
            });
        }
        let mut updated: Self = self.clone();
        updated.status = target;
        Ok(updated)
    }
}

/// Lifecycle state of a quota transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    /// Recorded, balances untouched until approval.
    #[default]
    Pending,
    /// Balances adjusted.
    Approved,
    /// Closed without touching balances.
    Rejected,
}

impl TransferStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Only pending transfers can be decided.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Pending, Self::Approved | Self::Rejected))
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
