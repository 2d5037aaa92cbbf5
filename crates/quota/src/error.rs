// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bloc_planning_domain::{DomainError, LeaveType, Severity, Violation};
use thiserror::Error;

/// Rule id used when a quota error is reported as a violation.
pub const QUOTA_TRANSFER: &str = "quota-transfer";

/// Expected, user-facing outcomes of a rejected quota operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QuotaError {
    /// The source balance cannot cover the debit.
    #[error(
        "Insufficient {leave_type} balance for staff '{staff_id}': {requested} day(s) requested, {remaining} remaining"
    )]
    InsufficientBalance {
        staff_id: String,
        leave_type: LeaveType,
        requested: f64,
        remaining: f64,
    },

    /// No enabled transfer rule connects the two leave types.
    #[error("No active transfer rule from {source_type} to {destination_type}")]
    NoActiveRule {
        source_type: LeaveType,
        destination_type: LeaveType,
    },

    /// The amount is zero, negative or not a number.
    #[error("Transfer amount must be a positive number of days, got {0}")]
    InvalidAmount(f64),

    /// A transfer rule carries an unusable rate or cap.
    #[error("Transfer rule '{rule_id}' is invalid: {reason}")]
    InvalidRule { rule_id: String, reason: String },

    /// Source and destination are the same leave type.
    #[error("Cannot transfer {0} days to the same leave type")]
    SameLeaveType(LeaveType),

    /// No transfer with this id exists.
    #[error("Transfer '{0}' not found")]
    TransferNotFound(String),

    /// A lifecycle rule was broken (e.g. approving a decided transfer).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The ledger state could not be captured for the audit trail.
    #[error("Failed to capture ledger state: {0}")]
    AuditCapture(String),
}

impl QuotaError {
    /// Stable error code returned to callers in place of a `TransferResult`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InsufficientBalance { .. } => "InsufficientBalance",
            Self::NoActiveRule { .. } => "NoActiveRule",
            Self::InvalidAmount(_) => "InvalidAmount",
            Self::InvalidRule { .. } => "InvalidRule",
            Self::SameLeaveType(_) => "SameLeaveType",
            Self::TransferNotFound(_) => "TransferNotFound",
            Self::Domain(_) => "InvalidTransition",
            Self::AuditCapture(_) => "AuditCapture",
        }
    }

    /// Reports the error in the shared violation shape.
    #[must_use]
    pub fn to_violation(&self) -> Violation {
        let violation: Violation = Violation::new(QUOTA_TRANSFER, Severity::Blocking, self.to_string());
        match self {
            Self::InsufficientBalance { staff_id, .. } => violation.affecting(staff_id),
            Self::TransferNotFound(id) => violation.affecting(id),
            _ => violation,
        }
    }
}

impl From<serde_json::Error> for QuotaError {
    fn from(err: serde_json::Error) -> Self {
        Self::AuditCapture(err.to_string())
    }
}
