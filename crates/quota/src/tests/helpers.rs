// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{QuotaLedger, TransferRequest, TransferRule};
use bloc_planning_audit::{Actor, Cause};
use bloc_planning_domain::{LeaveType, StaffId};

pub fn dupont() -> StaffId {
    StaffId::new("dupont")
}

pub fn create_test_actor() -> Actor {
    Actor::staff(&dupont())
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Quota transfer request"))
}

/// Dupont holds 3 annual and 2 recovery days.
///
/// - ANNUAL -> RECOVERY at 1:1, immediate
/// - RECOVERY -> ANNUAL at 0.5, waits for approval
pub fn create_test_ledger() -> QuotaLedger {
    let mut ledger: QuotaLedger = QuotaLedger::new();
    ledger.set_allotment(&dupont(), LeaveType::Annual, 3.0);
    ledger.set_allotment(&dupont(), LeaveType::Recovery, 2.0);
    ledger.add_rule(TransferRule::new(
        "annual-to-recovery",
        LeaveType::Annual,
        LeaveType::Recovery,
        1.0,
    ))
    .unwrap();
    let mut gated: TransferRule =
        TransferRule::new("recovery-to-annual", LeaveType::Recovery, LeaveType::Annual, 0.5);
    gated.requires_approval = true;
    ledger.add_rule(gated).unwrap();
    ledger
}

pub fn request(source: LeaveType, destination: LeaveType, days: f64) -> TransferRequest {
    TransferRequest {
        staff_id: dupont(),
        source_type: source,
        destination_type: destination,
        days,
    }
}
