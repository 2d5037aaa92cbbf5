// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Alternative search for blocking violations.
//!
//! Candidates are the subject assignment moved to a nearby slot or handed
//! to another staff member. Each candidate is re-validated with the full
//! rule set; only candidates with no blocking violation are returned. The
//! search is bounded by the configured radius and result count.

use crate::engine::ValidationEngine;
use crate::error::CoreError;
use crate::proposal::Proposal;
use crate::rules::{DOUBLE_BOOKING, QUALIFICATION, REST_TIME};
use crate::snapshot::Snapshot;
use bloc_planning_domain::{
    Assignment, Resource, ResourceId, ShiftPeriod, StaffId, StaffRole, SuggestedAction,
    ValidationResult, Violation,
};
use serde::{Deserialize, Serialize};
use time::{Date, Duration};
use tracing::debug;

/// One ranked alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// The change to make.
    pub action: SuggestedAction,
    /// The subject assignment as it would look after the change.
    pub assignment: Assignment,
    /// Violations (of any severity) left after the change.
    pub violation_count: usize,
    /// Days between the alternative and the original date.
    pub day_distance: u32,
}

type RankKey = (usize, u32, Date, bool, StaffId, ResourceId, ShiftPeriod);

fn rank_key(suggestion: &Suggestion, original: &Assignment) -> RankKey {
    let candidate: &Assignment = &suggestion.assignment;
    (
        suggestion.violation_count,
        suggestion.day_distance,
        candidate.date,
        candidate.resource_id != original.resource_id,
        candidate.staff_id.clone(),
        candidate.resource_id.clone(),
        candidate.shift_period,
    )
}

fn day_distance(a: Date, b: Date) -> u32 {
    u32::try_from((a - b).whole_days().unsigned_abs()).unwrap_or(u32::MAX)
}

impl ValidationEngine {
    /// Searches alternatives for a blocking violation.
    ///
    /// Only blocking `double-booking`, `qualification` and `rest-time`
    /// violations raised for a member of `proposal` are eligible; anything
    /// else yields an empty list, as does a search that finds nothing.
    ///
    /// # Arguments
    ///
    /// * `violation` - The violation to resolve
    /// * `proposal` - The proposal it was raised for
    /// * `snapshot` - The snapshot it was raised against
    ///
    /// # Errors
    ///
    /// Returns an error if the proposal is structurally malformed or the
    /// configuration is out of range.
    pub fn suggest_alternatives(
        &self,
        violation: &Violation,
        proposal: &Proposal,
        snapshot: &Snapshot,
    ) -> Result<Vec<Suggestion>, CoreError> {
        self.config().validate()?;
        proposal.validate()?;

        let rule_id: &str = violation.rule_id.as_str();
        if !violation.severity.is_blocking()
            || ![DOUBLE_BOOKING, QUALIFICATION, REST_TIME].contains(&rule_id)
        {
            return Ok(Vec::new());
        }
        let Some(subject) = violation
            .subject_id()
            .and_then(|id| proposal.proposed().into_iter().find(|a| a.id.value() == id))
        else {
            return Ok(Vec::new());
        };

        let mut candidates: Vec<(Assignment, SuggestedAction)> = Vec::new();
        if rule_id != QUALIFICATION {
            candidates.extend(self.slot_candidates(subject, snapshot));
        }
        candidates.extend(staff_candidates(subject, snapshot));
        let searched: usize = candidates.len();

        let mut suggestions: Vec<Suggestion> = candidates
            .into_iter()
            .filter_map(|(candidate, action)| {
                let trial: Proposal = proposal.replacing(&subject.id, &candidate);
                let result: ValidationResult = self.evaluate(&trial, snapshot);
                if result.blocking().next().is_some() {
                    return None;
                }
                Some(Suggestion {
                    action,
                    day_distance: day_distance(candidate.date, subject.date),
                    violation_count: result.violations.len(),
                    assignment: candidate,
                })
            })
            .collect();

        suggestions.sort_by_cached_key(|s| rank_key(s, subject));
        suggestions.truncate(self.config().resolver.max_suggestions);

        debug!(
            rule_id,
            assignment_id = subject.id.value(),
            searched,
            returned = suggestions.len(),
            "Searched alternatives"
        );

        Ok(suggestions)
    }

    /// The subject moved to nearby dates, day-time periods and sibling
    /// resources of the same sector and kind.
    fn slot_candidates(
        &self,
        subject: &Assignment,
        snapshot: &Snapshot,
    ) -> Vec<(Assignment, SuggestedAction)> {
        let original: Option<&Resource> = snapshot.resource(&subject.resource_id);
        let mut resources: Vec<&ResourceId> = snapshot
            .resources
            .iter()
            .filter(|r| {
                original.is_some_and(|o| r.sector_id == o.sector_id && r.kind == o.kind)
            })
            .map(|r| &r.id)
            .collect();
        if !resources.contains(&&subject.resource_id) {
            resources.push(&subject.resource_id);
        }
        resources.sort();

        let mut periods: Vec<ShiftPeriod> = ShiftPeriod::DAYTIME.to_vec();
        if !periods.contains(&subject.shift_period) {
            periods.push(subject.shift_period);
        }

        let radius: i64 = i64::from(self.config().resolver.search_radius_days);
        let mut candidates: Vec<(Assignment, SuggestedAction)> = Vec::new();
        for offset in -radius..=radius {
            let Some(date) = subject.date.checked_add(Duration::days(offset)) else {
                continue;
            };
            for period in &periods {
                for resource_id in &resources {
                    if date == subject.date
                        && *period == subject.shift_period
                        && *resource_id == &subject.resource_id
                    {
                        continue;
                    }
                    let mut candidate: Assignment = subject.clone();
                    candidate.date = date;
                    candidate.shift_period = *period;
                    candidate.resource_id = (*resource_id).clone();
                    let action: SuggestedAction = SuggestedAction::MoveToSlot {
                        date,
                        shift_period: *period,
                        resource_id: (*resource_id != &subject.resource_id)
                            .then(|| (*resource_id).clone()),
                    };
                    candidates.push((candidate, action));
                }
            }
        }
        candidates
    }
}

/// The subject handed to another staff member holding a required
/// qualification, or sharing the subject's role when none is required.
fn staff_candidates(
    subject: &Assignment,
    snapshot: &Snapshot,
) -> Vec<(Assignment, SuggestedAction)> {
    let required: &[String] = snapshot
        .resource(&subject.resource_id)
        .map(|r| r.required_qualifications.as_slice())
        .unwrap_or_default();
    let role: Option<StaffRole> = snapshot.staff_profile(&subject.staff_id).map(|p| p.role);

    snapshot
        .staff
        .iter()
        .filter(|p| p.id != subject.staff_id)
        .filter(|p| {
            if required.is_empty() {
                role.is_none_or(|r| r == p.role)
            } else {
                p.has_any_qualification(required)
            }
        })
        .map(|p| {
            let mut candidate: Assignment = subject.clone();
            candidate.staff_id = p.id.clone();
            let action: SuggestedAction = SuggestedAction::AssignStaff {
                staff_id: p.id.clone(),
                reason: format!(
                    "{} can take {} {}",
                    p.display_name, subject.date, subject.shift_period
                ),
            };
            (candidate, action)
        })
        .collect()
}
