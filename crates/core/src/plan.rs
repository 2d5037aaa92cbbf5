// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The effective plan: snapshot assignments with the proposal applied.

use crate::proposal::Proposal;
use crate::snapshot::Snapshot;
use bloc_planning_domain::{Assignment, AssignmentId, StaffId, iso_week_dates};
use std::collections::{BTreeMap, BTreeSet};
use time::{Date, Duration};

/// Active assignments after applying a proposal, indexed by staff member
/// and date so per-assignment lookups never scan the whole plan.
#[derive(Debug, Clone)]
pub struct PlanView {
    assignments: Vec<Assignment>,
    by_staff_date: BTreeMap<(StaffId, Date), Vec<usize>>,
    by_date: BTreeMap<Date, Vec<usize>>,
    proposed: BTreeSet<AssignmentId>,
    first_proposed: usize,
}

impl PlanView {
    /// Applies `proposal` to the snapshot's assignments.
    ///
    /// Snapshot assignments sharing an id with a proposed or removed one are
    /// dropped. Inactive assignments (drafts, or a week parity not matching
    /// the date) are left out. Proposal members only need a matching parity.
    #[must_use]
    pub fn build(snapshot: &Snapshot, proposal: &Proposal) -> Self {
        let replaced: BTreeSet<AssignmentId> = proposal.replaced_ids();

        let mut assignments: Vec<Assignment> = snapshot
            .assignments
            .iter()
            .filter(|a| !replaced.contains(&a.id) && a.is_active())
            .cloned()
            .collect();
        assignments.sort_by(|a, b| {
            (a.date, a.shift_period, &a.resource_id, &a.staff_id, &a.id).cmp(&(
                b.date,
                b.shift_period,
                &b.resource_id,
                &b.staff_id,
                &b.id,
            ))
        });

        let first_proposed: usize = assignments.len();
        let mut proposed: BTreeSet<AssignmentId> = BTreeSet::new();
        for member in proposal.proposed() {
            if member.week_parity.matches(member.date) {
                proposed.insert(member.id.clone());
                assignments.push(member.clone());
            }
        }

        let mut by_staff_date: BTreeMap<(StaffId, Date), Vec<usize>> = BTreeMap::new();
        let mut by_date: BTreeMap<Date, Vec<usize>> = BTreeMap::new();
        for (index, assignment) in assignments.iter().enumerate() {
            by_staff_date
                .entry((assignment.staff_id.clone(), assignment.date))
                .or_default()
                .push(index);
            by_date.entry(assignment.date).or_default().push(index);
        }

        Self {
            assignments,
            by_staff_date,
            by_date,
            proposed,
            first_proposed,
        }
    }

    /// Every active assignment.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Active proposal members, in proposal order.
    #[must_use]
    pub fn proposed(&self) -> &[Assignment] {
        self.assignments.get(self.first_proposed..).unwrap_or_default()
    }

    /// Whether `id` belongs to the proposal.
    #[must_use]
    pub fn is_proposed(&self, id: &AssignmentId) -> bool {
        self.proposed.contains(id)
    }

    fn resolve<'a>(
        &'a self,
        indices: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = &'a Assignment> {
        indices
            .into_iter()
            .flatten()
            .filter_map(|index| self.assignments.get(*index))
    }

    /// Assignments of one staff member on one date.
    pub fn staff_on<'a>(
        &'a self,
        staff_id: &StaffId,
        date: Date,
    ) -> impl Iterator<Item = &'a Assignment> + use<'a> {
        self.resolve(self.by_staff_date.get(&(staff_id.clone(), date)))
    }

    /// Assignments of one staff member dated within `days` of `date`, in
    /// date order.
    #[must_use]
    pub fn staff_around(&self, staff_id: &StaffId, date: Date, days: u32) -> Vec<&Assignment> {
        let delta: Duration = Duration::days(i64::from(days));
        self.staff_between(
            staff_id,
            date.saturating_sub(delta),
            date.saturating_add(delta),
        )
    }

    /// Assignments of one staff member dated in `[start, end]`, in date order.
    #[must_use]
    pub fn staff_between(&self, staff_id: &StaffId, start: Date, end: Date) -> Vec<&Assignment> {
        if end < start {
            return Vec::new();
        }
        self.by_staff_date
            .range((staff_id.clone(), start)..=(staff_id.clone(), end))
            .flat_map(|(_, indices)| indices.iter())
            .filter_map(|index| self.assignments.get(*index))
            .collect()
    }

    /// Whether the staff member holds any assignment on `date`.
    #[must_use]
    pub fn works_on(&self, staff_id: &StaffId, date: Date) -> bool {
        self.staff_on(staff_id, date).next().is_some()
    }

    /// Assignments of one staff member in the ISO week containing `date`.
    #[must_use]
    pub fn staff_in_week(&self, staff_id: &StaffId, date: Date) -> Vec<&Assignment> {
        iso_week_dates(date)
            .into_iter()
            .flat_map(|day| self.staff_on(staff_id, day))
            .collect()
    }

    /// All assignments on one date.
    pub fn on_date(&self, date: Date) -> impl Iterator<Item = &Assignment> {
        self.resolve(self.by_date.get(&date))
    }

    /// Staff members holding at least one assignment.
    #[must_use]
    pub fn staff_ids(&self) -> BTreeSet<&StaffId> {
        self.assignments.iter().map(|a| &a.staff_id).collect()
    }
}
