// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The quota ledger.
//!
//! Every mutation follows the same shape: validate, apply to a copy of the
//! ledger, record the before/after audit event on that copy, then commit the
//! copy. A failure at any step leaves the ledger untouched.

use crate::balance::QuotaBalance;
use crate::error::QuotaError;
use crate::rule::{CarryOverRule, TransferRule};
use bloc_planning_audit::{Action, Actor, AuditLog, Cause, StateSnapshot};
use bloc_planning_domain::{DomainError, LeaveType, StaffId, TransferStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A request to move days from one leave type to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub staff_id: StaffId,
    pub source_type: LeaveType,
    pub destination_type: LeaveType,
    pub days: f64,
}

/// A recorded transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaTransfer {
    pub id: String,
    pub staff_id: StaffId,
    pub source_type: LeaveType,
    pub destination_type: LeaveType,
    pub days_debited: f64,
    pub days_credited: f64,
    pub status: TransferStatus,
    /// The rule that priced the transfer.
    pub rule_id: String,
}

/// Outcome of an accepted transfer operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    pub success: bool,
    pub transfer_id: String,
    pub status: TransferStatus,
    /// Remaining source days after the operation.
    pub source_remaining: f64,
    /// Remaining destination days after the operation.
    pub target_total: f64,
}

/// What a transfer would do, computed without touching the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSimulation {
    pub rule_id: String,
    pub days_debited: f64,
    pub days_credited: f64,
    pub requires_approval: bool,
    pub source_remaining_after: f64,
    pub target_total_after: f64,
}

/// What a carry-over policy would move into the next period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarryOverSimulation {
    pub staff_id: StaffId,
    pub leave_type: LeaveType,
    pub remaining: f64,
    pub carried_over: f64,
    pub forfeited: f64,
}

/// The slice of ledger state an audit event records.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferState<'a> {
    transfer: Option<&'a QuotaTransfer>,
    source: Option<&'a QuotaBalance>,
    destination: Option<&'a QuotaBalance>,
}

/// Balances, transfer rules and the transfer history of one organisation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaLedger {
    #[serde(default)]
    balances: Vec<QuotaBalance>,
    #[serde(default)]
    rules: Vec<TransferRule>,
    #[serde(default)]
    transfers: Vec<QuotaTransfer>,
    #[serde(default)]
    audit: AuditLog,
}

impl QuotaLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            balances: Vec::new(),
            rules: Vec::new(),
            transfers: Vec::new(),
            audit: AuditLog::new(),
        }
    }

    /// Registers a transfer rule.
    ///
    /// # Errors
    ///
    /// Returns `QuotaError::InvalidRule` if the rate or the cap is not a
    /// positive finite number.
    pub fn add_rule(&mut self, rule: TransferRule) -> Result<(), QuotaError> {
        rule.check()?;
        self.rules.push(rule);
        Ok(())
    }

    /// Sets the days granted to a staff member for a leave type.
    pub fn set_allotment(&mut self, staff_id: &StaffId, leave_type: LeaveType, days: f64) {
        self.balance_mut(staff_id, leave_type).allotted = days;
    }

    /// Books days taken against a balance.
    ///
    /// # Errors
    ///
    /// Returns an error if `days` is not positive, or if the balance cannot
    /// cover it.
    pub fn record_usage(
        &mut self,
        staff_id: &StaffId,
        leave_type: LeaveType,
        days: f64,
    ) -> Result<(), QuotaError> {
        if !days.is_finite() || days <= 0.0 {
            return Err(QuotaError::InvalidAmount(days));
        }
        let remaining: f64 = self.remaining(staff_id, leave_type);
        if remaining < days {
            return Err(QuotaError::InsufficientBalance {
                staff_id: staff_id.to_string(),
                leave_type,
                requested: days,
                remaining,
            });
        }
        self.balance_mut(staff_id, leave_type).used += days;
        Ok(())
    }

    #[must_use]
    pub fn balance(&self, staff_id: &StaffId, leave_type: LeaveType) -> Option<&QuotaBalance> {
        self.balances.iter().find(|b| b.is_for(staff_id, leave_type))
    }

    /// Days available, zero when no balance exists.
    #[must_use]
    pub fn remaining(&self, staff_id: &StaffId, leave_type: LeaveType) -> f64 {
        self.balance(staff_id, leave_type)
            .map_or(0.0, QuotaBalance::remaining)
    }

    #[must_use]
    pub fn balances(&self) -> &[QuotaBalance] {
        &self.balances
    }

    #[must_use]
    pub fn rules(&self) -> &[TransferRule] {
        &self.rules
    }

    #[must_use]
    pub fn transfers(&self) -> &[QuotaTransfer] {
        &self.transfers
    }

    #[must_use]
    pub fn transfer(&self, transfer_id: &str) -> Option<&QuotaTransfer> {
        self.transfers.iter().find(|t| t.id == transfer_id)
    }

    #[must_use]
    pub const fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// The first enabled rule converting `source` into `destination`.
    #[must_use]
    pub fn active_rule(&self, source: LeaveType, destination: LeaveType) -> Option<&TransferRule> {
        self.rules.iter().find(|r| r.applies_to(source, destination))
    }

    /// Prices a transfer without changing anything.
    ///
    /// # Errors
    ///
    /// Returns the same error `execute_transfer` would.
    pub fn simulate_transfer(
        &self,
        request: &TransferRequest,
    ) -> Result<TransferSimulation, QuotaError> {
        let rule: &TransferRule = self.check(request)?;
        let days_credited: f64 = rule.credited_for(request.days);

        debug!(
            staff_id = %request.staff_id,
            source = %request.source_type,
            destination = %request.destination_type,
            days = request.days,
            days_credited,
            "Simulated quota transfer"
        );

        Ok(TransferSimulation {
            rule_id: rule.id.clone(),
            days_debited: request.days,
            days_credited,
            requires_approval: rule.requires_approval,
            source_remaining_after: self.remaining(&request.staff_id, request.source_type)
                - request.days,
            target_total_after: self.remaining(&request.staff_id, request.destination_type)
                + days_credited,
        })
    }

    /// Records a transfer, moving the balances unless the rule requires
    /// approval.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is invalid, both types are the same,
    /// no enabled rule applies, or the source balance is too low. The ledger
    /// is unchanged on error.
    pub fn execute_transfer(
        &mut self,
        request: &TransferRequest,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransferResult, QuotaError> {
        let rule: TransferRule = self.check(request)?.clone();
        let mut next: Self = self.clone();

        let transfer: QuotaTransfer = QuotaTransfer {
            id: format!("transfer-{}", next.transfers.len() + 1),
            staff_id: request.staff_id.clone(),
            source_type: request.source_type,
            destination_type: request.destination_type,
            days_debited: request.days,
            days_credited: rule.credited_for(request.days),
            status: if rule.requires_approval {
                TransferStatus::Pending
            } else {
                TransferStatus::Approved
            },
            rule_id: rule.id,
        };

        let before: StateSnapshot = next.capture(None, &transfer)?;
        if transfer.status == TransferStatus::Approved {
            next.apply(&transfer);
        }
        next.transfers.push(transfer.clone());
        let after: StateSnapshot = next.capture(Some(&transfer.id), &transfer)?;

        let action_name: &str = if transfer.status == TransferStatus::Pending {
            "RequestTransfer"
        } else {
            "ExecuteTransfer"
        };
        next.audit.record(
            &transfer.id,
            actor,
            cause,
            Action::new(
                action_name.to_string(),
                Some(format!(
                    "{} {} -> {} {}",
                    transfer.days_debited,
                    transfer.source_type,
                    transfer.days_credited,
                    transfer.destination_type
                )),
            ),
            before,
            after,
        );

        *self = next;
        info!(
            transfer_id = %transfer.id,
            staff_id = %transfer.staff_id,
            status = %transfer.status,
            days_debited = transfer.days_debited,
            days_credited = transfer.days_credited,
            "Recorded quota transfer"
        );
        Ok(self.result_for(&transfer))
    }

    /// Approves a pending transfer and moves the balances.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer does not exist, is already decided,
    /// or the source balance can no longer cover it.
    pub fn approve_transfer(
        &mut self,
        transfer_id: &str,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransferResult, QuotaError> {
        let pending: QuotaTransfer = self.decidable(transfer_id, TransferStatus::Approved)?;
        // balances may have moved since the request
        let remaining: f64 = self.remaining(&pending.staff_id, pending.source_type);
        if remaining < pending.days_debited {
            return Err(QuotaError::InsufficientBalance {
                staff_id: pending.staff_id.to_string(),
                leave_type: pending.source_type,
                requested: pending.days_debited,
                remaining,
            });
        }

        self.decide(pending, TransferStatus::Approved, actor, cause)
    }

    /// Closes a pending transfer without moving any days.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer does not exist or is already decided.
    pub fn reject_transfer(
        &mut self,
        transfer_id: &str,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransferResult, QuotaError> {
        let pending: QuotaTransfer = self.decidable(transfer_id, TransferStatus::Rejected)?;
        self.decide(pending, TransferStatus::Rejected, actor, cause)
    }

    /// Computes what `rule` would carry into the next period.
    #[must_use]
    pub fn simulate_carry_over(
        &self,
        staff_id: &StaffId,
        rule: &CarryOverRule,
    ) -> CarryOverSimulation {
        let remaining: f64 = self.remaining(staff_id, rule.leave_type);
        let carried_over: f64 = rule.carried_from(remaining);
        CarryOverSimulation {
            staff_id: staff_id.clone(),
            leave_type: rule.leave_type,
            remaining,
            carried_over,
            forfeited: (remaining - carried_over).max(0.0),
        }
    }

    fn check(&self, request: &TransferRequest) -> Result<&TransferRule, QuotaError> {
        if !request.days.is_finite() || request.days <= 0.0 {
            return Err(QuotaError::InvalidAmount(request.days));
        }
        if request.source_type == request.destination_type {
            return Err(QuotaError::SameLeaveType(request.source_type));
        }
        let rule: &TransferRule = self
            .active_rule(request.source_type, request.destination_type)
            .ok_or(QuotaError::NoActiveRule {
                source_type: request.source_type,
                destination_type: request.destination_type,
            })?;
        let remaining: f64 = self.remaining(&request.staff_id, request.source_type);
        if remaining < request.days {
            return Err(QuotaError::InsufficientBalance {
                staff_id: request.staff_id.to_string(),
                leave_type: request.source_type,
                requested: request.days,
                remaining,
            });
        }
        Ok(rule)
    }

    fn decidable(
        &self,
        transfer_id: &str,
        target: TransferStatus,
    ) -> Result<QuotaTransfer, QuotaError> {
        let transfer: &QuotaTransfer = self
            .transfer(transfer_id)
            .ok_or_else(|| QuotaError::TransferNotFound(transfer_id.to_string()))?;
        if !transfer.status.can_transition_to(target) {
            return Err(DomainError::InvalidTransition {
                entity: "transfer",
                from: transfer.status.to_string(),
                to: target.to_string(),
            }
            .into());
        }
        Ok(transfer.clone())
    }

    fn decide(
        &mut self,
        pending: QuotaTransfer,
        target: TransferStatus,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransferResult, QuotaError> {
        let mut next: Self = self.clone();
        let before: StateSnapshot = next.capture(Some(&pending.id), &pending)?;

        let mut decided: QuotaTransfer = pending;
        decided.status = target;
        if target == TransferStatus::Approved {
            next.apply(&decided);
        }
        if let Some(slot) = next.transfers.iter_mut().find(|t| t.id == decided.id) {
            *slot = decided.clone();
        }
        let after: StateSnapshot = next.capture(Some(&decided.id), &decided)?;

        let action_name: &str = if target == TransferStatus::Approved {
            "ApproveTransfer"
        } else {
            "RejectTransfer"
        };
        next.audit.record(
            &decided.id,
            actor,
            cause,
            Action::new(action_name.to_string(), None),
            before,
            after,
        );

        *self = next;
        info!(
            transfer_id = %decided.id,
            status = %decided.status,
            "Decided quota transfer"
        );
        Ok(self.result_for(&decided))
    }

    fn apply(&mut self, transfer: &QuotaTransfer) {
        self.balance_mut(&transfer.staff_id, transfer.source_type)
            .transferred_out += transfer.days_debited;
        self.balance_mut(&transfer.staff_id, transfer.destination_type)
            .transferred_in += transfer.days_credited;
    }

    fn balance_mut(&mut self, staff_id: &StaffId, leave_type: LeaveType) -> &mut QuotaBalance {
        let index: usize = self
            .balances
            .iter()
            .position(|b| b.is_for(staff_id, leave_type))
            .unwrap_or_else(|| {
                self.balances
                    .push(QuotaBalance::new(staff_id.clone(), leave_type, 0.0));
                self.balances.len() - 1
            });
        &mut self.balances[index]
    }

    fn capture(
        &self,
        recorded_id: Option<&str>,
        transfer: &QuotaTransfer,
    ) -> Result<StateSnapshot, QuotaError> {
        let state: TransferState<'_> = TransferState {
            transfer: recorded_id.and_then(|id| self.transfer(id)),
            source: self.balance(&transfer.staff_id, transfer.source_type),
            destination: self.balance(&transfer.staff_id, transfer.destination_type),
        };
        Ok(StateSnapshot::capture(&state)?)
    }

    fn result_for(&self, transfer: &QuotaTransfer) -> TransferResult {
        TransferResult {
            success: true,
            transfer_id: transfer.id.clone(),
            status: transfer.status,
            source_remaining: self.remaining(&transfer.staff_id, transfer.source_type),
            target_total: self.remaining(&transfer.staff_id, transfer.destination_type),
        }
    }
}
