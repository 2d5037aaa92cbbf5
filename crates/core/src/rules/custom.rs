// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{EvaluationContext, Rule, RuleCategory};
use crate::condition::{AssignmentFacts, CustomRuleDefinition, RuleScope};
use bloc_planning_domain::{
    Assignment, StaffId, Violation, format_day_month, iso_week_dates, iso_week_key,
};
use std::collections::BTreeMap;
use time::Date;

/// Generic counting rule driven by a [`CustomRuleDefinition`].
///
/// Matching assignments are grouped by staff member and day (or ISO week);
/// a group touched by the proposal that holds more than `limit` of them is
/// a violation.
#[derive(Debug, Clone)]
pub struct CustomRule {
    rule_id: String,
    definition: CustomRuleDefinition,
}

impl CustomRule {
    /// Creates a new `CustomRule`.
    #[must_use]
    pub fn new(definition: CustomRuleDefinition) -> Self {
        Self {
            rule_id: definition.rule_id(),
            definition,
        }
    }

    /// The underlying definition.
    #[must_use]
    pub const fn definition(&self) -> &CustomRuleDefinition {
        &self.definition
    }

    fn matches(&self, ctx: &EvaluationContext<'_>, assignment: &Assignment) -> bool {
        let facts: AssignmentFacts<'_> = AssignmentFacts {
            activity_kind: assignment.activity_kind.as_deref(),
            shift_period: assignment.shift_period,
            resource_id: &assignment.resource_id,
            sector_id: ctx
                .snapshot
                .resource(&assignment.resource_id)
                .map(|r| &r.sector_id),
            staff_role: ctx
                .snapshot
                .staff_profile(&assignment.staff_id)
                .map(|p| p.role),
            hours: assignment.hours(),
        };
        self.definition.matches(&facts)
    }

    fn group_anchor(&self, date: Date) -> Date {
        match self.definition.scope {
            RuleScope::PerStaffPerDay => date,
            RuleScope::PerStaffPerWeek => iso_week_dates(date)[0],
        }
    }
}

impl Rule for CustomRule {
    fn id(&self) -> &str {
        &self.rule_id
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Custom
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Vec<Violation> {
        let mut groups: BTreeMap<(&StaffId, Date), &Assignment> = BTreeMap::new();
        for subject in ctx.plan.proposed() {
            if self.matches(ctx, subject) {
                groups
                    .entry((&subject.staff_id, self.group_anchor(subject.date)))
                    .or_insert(subject);
            }
        }

        let mut violations: Vec<Violation> = Vec::new();
        for ((staff_id, anchor), subject) in groups {
            let members: Vec<&Assignment> = match self.definition.scope {
                RuleScope::PerStaffPerDay => ctx.plan.staff_on(staff_id, anchor).collect(),
                RuleScope::PerStaffPerWeek => ctx.plan.staff_in_week(staff_id, anchor),
            };
            let matching: Vec<&Assignment> = members
                .into_iter()
                .filter(|a| self.matches(ctx, a))
                .collect();
            let count: u32 = u32::try_from(matching.len()).unwrap_or(u32::MAX);
            if count <= self.definition.limit {
                continue;
            }

            let period: String = match self.definition.scope {
                RuleScope::PerStaffPerDay => format!("on {}", format_day_month(anchor)),
                RuleScope::PerStaffPerWeek => {
                    let (year, week) = iso_week_key(anchor);
                    format!("in week {week} of {year}")
                }
            };

            let mut violation: Violation = Violation::new(
                &self.rule_id,
                self.definition.severity,
                format!(
                    "{}: {} has {count} matching assignments {period}, limit is {}",
                    self.definition.name,
                    ctx.snapshot.staff_name(staff_id),
                    self.definition.limit
                ),
            )
            .affecting(subject.id.value());
            for member in matching {
                violation = violation.affecting(member.id.value());
            }
            violations.push(violation.affecting(staff_id.value()));
        }

        violations
    }
}
