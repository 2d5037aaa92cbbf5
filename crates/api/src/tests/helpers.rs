// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use bloc_planning::{
    CustomRuleDefinition, DateRange, EngineConfig, Proposal, Snapshot, SnapshotError,
    SnapshotProvider, ValidationEngine,
};
use bloc_planning_audit::{Actor, ActorKind};
use bloc_planning_domain::{
    Assignment, AssignmentStatus, Leave, LeaveType, Resource, ResourceId, Sector, SectorId,
    ShiftPeriod, StaffId, StaffProfile, StaffRole,
};
use bloc_planning_quota::{QuotaLedger, TransferRequest, TransferRule};
use time::Date;
use time::macros::date;

use crate::{ExecuteTransferRequest, ValidationRequest};

pub const MONDAY: Date = date!(2025 - 07 - 07);

pub fn create_test_engine() -> ValidationEngine {
    ValidationEngine::standard(EngineConfig::default())
}

/// Durand (intern), Dupont and Senior (seniors), one bloc room.
///
/// Dupont worked the night of Sunday 2025-07-06.
pub fn create_test_snapshot() -> Snapshot {
    let mut snapshot: Snapshot = Snapshot::new();
    snapshot.staff = vec![
        StaffProfile::new(StaffId::new("durand"), "Durand", StaffRole::Intern),
        StaffProfile::new(StaffId::new("dupont"), "Dr Dupont", StaffRole::Senior),
        StaffProfile::new(StaffId::new("senior"), "Dr Senior", StaffRole::Senior),
    ];
    let bloc: SectorId = SectorId::new("BLOC");
    snapshot.resources = vec![
        Resource::new(ResourceId::new("ROOM-A"), "Room A", bloc.clone()),
        Resource::new(ResourceId::new("ROOM-B"), "Room B", bloc.clone()),
    ];
    snapshot.sectors = vec![Sector::new(bloc, "Bloc", 0)];
    snapshot.assignments = vec![
        Assignment::new(
            "night",
            "dupont",
            "ROOM-A",
            date!(2025 - 07 - 06),
            ShiftPeriod::Night,
        )
        .with_status(AssignmentStatus::Confirmed),
    ];
    snapshot
}

pub fn single(staff: &str, period: ShiftPeriod) -> ValidationRequest {
    ValidationRequest {
        proposal: Proposal::Assign(Assignment::new("a-1", staff, "ROOM-A", MONDAY, period)),
        window_start: MONDAY,
        window_end: date!(2025 - 07 - 13),
    }
}

/// A provider whose every call fails.
pub struct UnreachableStore;

impl UnreachableStore {
    fn fail<T>() -> Result<T, SnapshotError> {
        Err(SnapshotError::Unavailable(String::from(
            "connection refused",
        )))
    }
}

impl SnapshotProvider for UnreachableStore {
    fn get_assignments(
        &self,
        _staff_ids: &[StaffId],
        _range: DateRange,
    ) -> Result<Vec<Assignment>, SnapshotError> {
        Self::fail()
    }

    fn get_approved_leaves(
        &self,
        _staff_ids: &[StaffId],
        _range: DateRange,
    ) -> Result<Vec<Leave>, SnapshotError> {
        Self::fail()
    }

    fn get_staff_profile(&self, _staff_id: &StaffId) -> Result<Option<StaffProfile>, SnapshotError> {
        Self::fail()
    }

    fn get_sector_minimums(&self, _sector_id: &SectorId) -> Result<Option<Sector>, SnapshotError> {
        Self::fail()
    }

    fn get_active_custom_rules(&self) -> Result<Vec<CustomRuleDefinition>, SnapshotError> {
        Self::fail()
    }

    fn list_staff(&self) -> Result<Vec<StaffProfile>, SnapshotError> {
        Self::fail()
    }

    fn list_resources(&self) -> Result<Vec<Resource>, SnapshotError> {
        Self::fail()
    }
}

pub fn create_test_planner() -> Actor {
    Actor::new(String::from("planner-1"), ActorKind::Planner)
}

pub fn create_test_staff_actor(staff: &str) -> Actor {
    Actor::staff(&StaffId::new(staff))
}

/// Dupont holds 3 annual and 4 recovery days.
///
/// - ANNUAL -> RECOVERY at 1:1, immediate
/// - RECOVERY -> ANNUAL at 1:1, waits for approval
pub fn create_test_ledger() -> QuotaLedger {
    let dupont: StaffId = StaffId::new("dupont");
    let mut ledger: QuotaLedger = QuotaLedger::new();
    ledger.set_allotment(&dupont, LeaveType::Annual, 3.0);
    ledger.set_allotment(&dupont, LeaveType::Recovery, 4.0);
    ledger.add_rule(TransferRule::new(
        "annual-to-recovery",
        LeaveType::Annual,
        LeaveType::Recovery,
        1.0,
    ))
    .unwrap();
    let mut gated: TransferRule =
        TransferRule::new("recovery-to-annual", LeaveType::Recovery, LeaveType::Annual, 1.0);
    gated.requires_approval = true;
    ledger.add_rule(gated).unwrap();
    ledger
}

pub fn transfer(
    staff: &str,
    source: LeaveType,
    destination: LeaveType,
    days: f64,
) -> ExecuteTransferRequest {
    ExecuteTransferRequest {
        transfer: TransferRequest {
            staff_id: StaffId::new(staff),
            source_type: source,
            destination_type: destination,
            days,
        },
        request_id: Some(String::from("req-42")),
    }
}
