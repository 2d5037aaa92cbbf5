// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bloc_planning_domain::{
    Assignment, AssignmentId, DomainError, StaffId, validate_assignment_fields,
    validate_unique_assignment_ids,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::Date;

/// A change submitted for validation.
///
/// Serialized untagged: a single assignment object, an array of
/// assignments, `{ "assignment": …, "adminOverride": … }` for a removal or
/// `{ "first": …, "second": … }` for a swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Proposal {
    /// A single new or modified assignment.
    Assign(Assignment),
    /// Several assignments validated together, each seeing the others.
    Batch(Vec<Assignment>),
    /// Deletion of an existing assignment.
    #[serde(rename_all = "camelCase")]
    Remove {
        /// The assignment being removed.
        assignment: Assignment,
        /// An administrator accepted the consequences.
        #[serde(default)]
        admin_override: bool,
    },
    /// Two assignments after exchanging their staff members.
    Swap {
        /// The first assignment, now held by the second staff member.
        first: Assignment,
        /// The second assignment, now held by the first staff member.
        second: Assignment,
    },
}

impl Proposal {
    /// Builds the swap of two existing assignments: each keeps its slot and
    /// resource and takes the other's staff member.
    #[must_use]
    pub fn swap(first: &Assignment, second: &Assignment) -> Self {
        let mut swapped_first: Assignment = first.clone();
        let mut swapped_second: Assignment = second.clone();
        swapped_first.staff_id = second.staff_id.clone();
        swapped_second.staff_id = first.staff_id.clone();
        Self::Swap {
            first: swapped_first,
            second: swapped_second,
        }
    }

    /// Assignments that will exist after the change, in proposal order.
    #[must_use]
    pub fn proposed(&self) -> Vec<&Assignment> {
        match self {
            Self::Assign(assignment) => vec![assignment],
            Self::Batch(assignments) => assignments.iter().collect(),
            Self::Remove { .. } => Vec::new(),
            Self::Swap { first, second } => vec![first, second],
        }
    }

    /// The assignment being removed, if any.
    #[must_use]
    pub const fn removed(&self) -> Option<&Assignment> {
        match self {
            Self::Remove { assignment, .. } => Some(assignment),
            _ => None,
        }
    }

    /// Whether a removal carries an administrator override.
    #[must_use]
    pub const fn admin_override(&self) -> bool {
        matches!(
            self,
            Self::Remove {
                admin_override: true,
                ..
            }
        )
    }

    /// Ids of existing assignments this proposal replaces or deletes.
    #[must_use]
    pub fn replaced_ids(&self) -> BTreeSet<AssignmentId> {
        self.proposed()
            .into_iter()
            .chain(self.removed())
            .map(|a| a.id.clone())
            .collect()
    }

    /// Staff members touched by the proposal, sorted.
    #[must_use]
    pub fn staff_ids(&self) -> Vec<StaffId> {
        let ids: BTreeSet<StaffId> = self
            .proposed()
            .into_iter()
            .chain(self.removed())
            .map(|a| a.staff_id.clone())
            .collect();
        ids.into_iter().collect()
    }

    /// Earliest and latest dates touched by the proposal.
    #[must_use]
    pub fn date_span(&self) -> Option<(Date, Date)> {
        let dates: BTreeSet<Date> = self
            .proposed()
            .into_iter()
            .chain(self.removed())
            .map(|a| a.date)
            .collect();
        Some((*dates.first()?, *dates.last()?))
    }

    /// The same proposal with the assignment `id` replaced by `candidate`.
    #[must_use]
    pub fn replacing(&self, id: &AssignmentId, candidate: &Assignment) -> Self {
        let pick = |a: &Assignment| {
            if &a.id == id {
                candidate.clone()
            } else {
                a.clone()
            }
        };
        match self {
            Self::Assign(a) => Self::Assign(pick(a)),
            Self::Batch(assignments) => Self::Batch(assignments.iter().map(pick).collect()),
            Self::Remove { .. } => self.clone(),
            Self::Swap { first, second } => Self::Swap {
                first: pick(first),
                second: pick(second),
            },
        }
    }

    /// Checks structural preconditions.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An assignment has an empty identifier or an implausible date
    /// - A batch repeats an assignment id
    /// - A swap has the same staff member or assignment on both sides
    pub fn validate(&self) -> Result<(), DomainError> {
        for assignment in self.proposed().into_iter().chain(self.removed()) {
            validate_assignment_fields(assignment)?;
        }

        match self {
            Self::Batch(assignments) => validate_unique_assignment_ids(assignments),
            Self::Swap { first, second } => {
                if first.id == second.id {
                    return Err(DomainError::InvalidSwap(format!(
                        "assignment '{}' cannot be swapped with itself",
                        first.id
                    )));
                }
                if first.staff_id == second.staff_id {
                    return Err(DomainError::InvalidSwap(format!(
                        "both assignments belong to '{}'",
                        first.staff_id
                    )));
                }
                Ok(())
            }
            Self::Assign(_) | Self::Remove { .. } => Ok(()),
        }
    }
}
