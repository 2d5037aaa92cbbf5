// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EngineConfig, Proposal, Snapshot, ValidationEngine};
use bloc_planning_domain::{
    Assignment, AssignmentStatus, Leave, LeaveStatus, LeaveType, Resource, ResourceId, Sector,
    SectorId, ShiftPeriod, StaffId, StaffProfile, StaffRole, ValidationResult,
};
use time::Date;
use time::macros::date;

/// Monday of ISO week 28 (even).
pub const MONDAY: Date = date!(2025 - 07 - 07);

pub fn create_test_engine() -> ValidationEngine {
    ValidationEngine::standard(EngineConfig::default())
}

pub fn create_test_engine_with(config: EngineConfig) -> ValidationEngine {
    ValidationEngine::standard(config)
}

/// Staff, rooms and sectors shared by most tests.
///
/// - durand: intern
/// - dupont: senior holding CARDIAC
/// - martin, senior: seniors
/// - nurse-1..nurse-3: nurses
/// - ROOM-A, ROOM-B: bloc rooms; ROOM-C: bloc room requiring CARDIAC
/// - URG-1, URG-2: Urgences services, minimum three staff
pub fn create_test_snapshot() -> Snapshot {
    let mut snapshot: Snapshot = Snapshot::new();

    snapshot.staff = vec![
        StaffProfile::new(StaffId::new("durand"), "Durand", StaffRole::Intern),
        StaffProfile::new(StaffId::new("dupont"), "Dr Dupont", StaffRole::Senior)
            .with_qualification("CARDIAC"),
        StaffProfile::new(StaffId::new("martin"), "Dr Martin", StaffRole::Senior),
        StaffProfile::new(StaffId::new("senior"), "Dr Senior", StaffRole::Senior),
        StaffProfile::new(StaffId::new("nurse-1"), "Nurse One", StaffRole::Nurse),
        StaffProfile::new(StaffId::new("nurse-2"), "Nurse Two", StaffRole::Nurse),
        StaffProfile::new(StaffId::new("nurse-3"), "Nurse Three", StaffRole::Nurse),
    ];

    let bloc: SectorId = SectorId::new("BLOC");
    let urgences: SectorId = SectorId::new("URG");
    snapshot.resources = vec![
        Resource::new(ResourceId::new("ROOM-A"), "Room A", bloc.clone()),
        Resource::new(ResourceId::new("ROOM-B"), "Room B", bloc.clone()),
        Resource::new(ResourceId::new("ROOM-C"), "Room C", bloc.clone()).requiring("CARDIAC"),
        Resource::new(ResourceId::new("URG-1"), "Urgences 1", urgences.clone()),
        Resource::new(ResourceId::new("URG-2"), "Urgences 2", urgences.clone()),
    ];
    snapshot.sectors = vec![
        Sector::new(bloc, "Bloc", 0),
        Sector::new(urgences, "Urgences", 3),
    ];

    snapshot
}

pub fn assign(
    id: &str,
    staff: &str,
    resource: &str,
    date: Date,
    period: ShiftPeriod,
) -> Assignment {
    Assignment::new(id, staff, resource, date, period)
}

pub fn confirmed(
    id: &str,
    staff: &str,
    resource: &str,
    date: Date,
    period: ShiftPeriod,
) -> Assignment {
    assign(id, staff, resource, date, period).with_status(AssignmentStatus::Confirmed)
}

pub fn approved_leave(id: &str, staff: &str, start: Date, end: Date) -> Leave {
    Leave::new(id, StaffId::new(staff), start, end, LeaveType::Annual)
        .unwrap()
        .transition(LeaveStatus::Approved)
        .unwrap()
}

pub fn validate(
    engine: &ValidationEngine,
    proposal: &Proposal,
    snapshot: &Snapshot,
) -> ValidationResult {
    engine.validate(proposal, snapshot).unwrap()
}

/// Ten 4h slots for `staff` from Monday to Friday of the test week.
pub fn fill_week(snapshot: &mut Snapshot, staff: &str) {
    let days: [Date; 5] = [
        date!(2025 - 07 - 07),
        date!(2025 - 07 - 08),
        date!(2025 - 07 - 09),
        date!(2025 - 07 - 10),
        date!(2025 - 07 - 11),
    ];
    for (index, day) in days.iter().enumerate() {
        for period in [ShiftPeriod::Morning, ShiftPeriod::Afternoon] {
            let id: String = format!("{staff}-{index}-{period}");
            snapshot
                .assignments
                .push(confirmed(&id, staff, "ROOM-A", *day, period));
        }
    }
}
