// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The read-only view of planning data the engine reasons over.
//!
//! Persistence layers implement [`SnapshotProvider`]. The engine itself
//! only ever sees a [`Snapshot`], a consistent point-in-time copy loaded
//! once per request.

use crate::condition::CustomRuleDefinition;
use crate::error::SnapshotError;
use crate::rule_conflicts::detect_conflicts;
use bloc_planning_domain::{
    Assignment, DomainError, Leave, LeaveStatus, Resource, ResourceId, Sector, SectorId,
    StaffId, StaffProfile, month_bounds, validate_date_window,
};
use serde::{Deserialize, Serialize};
use time::{Date, Duration};
use tracing::{debug, warn};

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day.
    pub start: Date,
    /// Last day (inclusive).
    pub end: Date,
}

impl DateRange {
    /// Creates a new `DateRange`.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is before `start` or either bound lies
    /// outside the supported planning years.
    pub fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        validate_date_window(start, end)?;
        Ok(Self { start, end })
    }

    /// Whether `date` lies in the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// The range extended by `days` on both sides.
    #[must_use]
    pub fn widened(&self, days: u32) -> Self {
        let delta: Duration = Duration::days(i64::from(days));
        Self {
            start: self.start.saturating_sub(delta),
            end: self.end.saturating_add(delta),
        }
    }

    /// The range extended to the first and last day of its boundary months.
    #[must_use]
    pub fn whole_months(&self) -> Self {
        Self {
            start: month_bounds(self.start).0,
            end: month_bounds(self.end).1,
        }
    }
}

/// Read contract implemented by the persistence layer.
///
/// Lookups returning `Ok(None)` mean "no such entity"; an `Err` means the
/// store itself failed.
pub trait SnapshotProvider {
    /// Assignments of the given staff members dated within `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_assignments(
        &self,
        staff_ids: &[StaffId],
        range: DateRange,
    ) -> Result<Vec<Assignment>, SnapshotError>;

    /// Approved leaves of the given staff members intersecting `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_approved_leaves(
        &self,
        staff_ids: &[StaffId],
        range: DateRange,
    ) -> Result<Vec<Leave>, SnapshotError>;

    /// The profile of one staff member.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_staff_profile(&self, staff_id: &StaffId) -> Result<Option<StaffProfile>, SnapshotError>;

    /// The staffing minimum of one sector.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_sector_minimums(&self, sector_id: &SectorId) -> Result<Option<Sector>, SnapshotError>;

    /// Custom rules currently enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_active_custom_rules(&self) -> Result<Vec<CustomRuleDefinition>, SnapshotError>;

    /// Every staff member that can be planned.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_staff(&self) -> Result<Vec<StaffProfile>, SnapshotError>;

    /// Every room and service that can be planned.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_resources(&self) -> Result<Vec<Resource>, SnapshotError>;
}

/// A point-in-time copy of everything the rules need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    /// Existing assignments.
    pub assignments: Vec<Assignment>,
    /// Leaves. Only approved ones are considered by rules.
    pub leaves: Vec<Leave>,
    /// Staff profiles.
    pub staff: Vec<StaffProfile>,
    /// Rooms and services.
    pub resources: Vec<Resource>,
    /// Sectors and their minimums.
    pub sectors: Vec<Sector>,
    /// Custom rule definitions.
    pub custom_rules: Vec<CustomRuleDefinition>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a snapshot through a provider.
    ///
    /// Assignments and leaves are loaded for every listed staff member plus
    /// `staff_ids`, so rules can see co-assigned colleagues.
    ///
    /// # Errors
    ///
    /// Returns the first provider error encountered.
    pub fn load<P: SnapshotProvider + ?Sized>(
        provider: &P,
        staff_ids: &[StaffId],
        range: DateRange,
    ) -> Result<Self, SnapshotError> {
        let mut staff: Vec<StaffProfile> = provider.list_staff()?;
        for staff_id in staff_ids {
            if staff.iter().any(|p| &p.id == staff_id) {
                continue;
            }
            if let Some(profile) = provider.get_staff_profile(staff_id)? {
                staff.push(profile);
            }
        }

        let mut involved: Vec<StaffId> = staff
            .iter()
            .map(|p| p.id.clone())
            .chain(staff_ids.iter().cloned())
            .collect();
        involved.sort();
        involved.dedup();

        let assignments: Vec<Assignment> = provider.get_assignments(&involved, range)?;
        let leaves: Vec<Leave> = provider.get_approved_leaves(&involved, range)?;
        let resources: Vec<Resource> = provider.list_resources()?;

        let mut sector_ids: Vec<&SectorId> = resources.iter().map(|r| &r.sector_id).collect();
        sector_ids.sort();
        sector_ids.dedup();
        let mut sectors: Vec<Sector> = Vec::new();
        for sector_id in sector_ids {
            if let Some(sector) = provider.get_sector_minimums(sector_id)? {
                sectors.push(sector);
            }
        }

        let custom_rules: Vec<CustomRuleDefinition> = provider.get_active_custom_rules()?;
        for conflict in detect_conflicts(&custom_rules) {
            warn!(first = %conflict.first, second = %conflict.second, "{conflict}");
        }

        debug!(
            staff = staff.len(),
            assignments = assignments.len(),
            leaves = leaves.len(),
            resources = resources.len(),
            custom_rules = custom_rules.len(),
            "Loaded planning snapshot"
        );

        Ok(Self {
            assignments,
            leaves,
            staff,
            resources,
            sectors,
            custom_rules,
        })
    }

    /// Looks up a staff profile.
    #[must_use]
    pub fn staff_profile(&self, staff_id: &StaffId) -> Option<&StaffProfile> {
        self.staff.iter().find(|p| &p.id == staff_id)
    }

    /// Looks up a resource.
    #[must_use]
    pub fn resource(&self, resource_id: &ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| &r.id == resource_id)
    }

    /// Looks up a sector.
    #[must_use]
    pub fn sector(&self, sector_id: &SectorId) -> Option<&Sector> {
        self.sectors.iter().find(|s| &s.id == sector_id)
    }

    /// Approved leaves of one staff member.
    pub fn approved_leaves_for<'a>(
        &'a self,
        staff_id: &'a StaffId,
    ) -> impl Iterator<Item = &'a Leave> {
        self.leaves
            .iter()
            .filter(move |l| &l.staff_id == staff_id && l.status == LeaveStatus::Approved)
    }

    /// Whether the staff member is on approved leave on `date`.
    #[must_use]
    pub fn is_on_leave(&self, staff_id: &StaffId, date: Date) -> bool {
        self.approved_leaves_for(staff_id).any(|l| l.contains(date))
    }

    /// Name used in messages, falling back to the identifier.
    #[must_use]
    pub fn staff_name(&self, staff_id: &StaffId) -> String {
        self.staff_profile(staff_id)
            .map_or_else(|| staff_id.to_string(), |p| p.display_name.clone())
    }

    /// Name used in messages, falling back to the identifier.
    #[must_use]
    pub fn resource_name(&self, resource_id: &ResourceId) -> String {
        self.resource(resource_id)
            .map_or_else(|| resource_id.to_string(), |r| r.name.clone())
    }
}

/// An in-memory snapshot serves as its own provider, which is how the CLI
/// and the tests feed the engine.
impl SnapshotProvider for Snapshot {
    fn get_assignments(
        &self,
        staff_ids: &[StaffId],
        range: DateRange,
    ) -> Result<Vec<Assignment>, SnapshotError> {
        Ok(self
            .assignments
            .iter()
            .filter(|a| staff_ids.is_empty() || staff_ids.contains(&a.staff_id))
            .filter(|a| range.contains(a.date))
            .cloned()
            .collect())
    }

    fn get_approved_leaves(
        &self,
        staff_ids: &[StaffId],
        range: DateRange,
    ) -> Result<Vec<Leave>, SnapshotError> {
        Ok(self
            .leaves
            .iter()
            .filter(|l| staff_ids.is_empty() || staff_ids.contains(&l.staff_id))
            .filter(|l| l.status == LeaveStatus::Approved)
            .filter(|l| l.overlaps_range(range.start, range.end))
            .cloned()
            .collect())
    }

    fn get_staff_profile(&self, staff_id: &StaffId) -> Result<Option<StaffProfile>, SnapshotError> {
        Ok(self.staff_profile(staff_id).cloned())
    }

    fn get_sector_minimums(&self, sector_id: &SectorId) -> Result<Option<Sector>, SnapshotError> {
        Ok(self.sector(sector_id).cloned())
    }

    fn get_active_custom_rules(&self) -> Result<Vec<CustomRuleDefinition>, SnapshotError> {
        Ok(self
            .custom_rules
            .iter()
            .filter(|r| r.enabled)
            .cloned()
            .collect())
    }

    fn list_staff(&self) -> Result<Vec<StaffProfile>, SnapshotError> {
        Ok(self.staff.clone())
    }

    fn list_resources(&self) -> Result<Vec<Resource>, SnapshotError> {
        Ok(self.resources.clone())
    }
}
