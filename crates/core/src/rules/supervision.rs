// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{EvaluationContext, Rule, RuleCategory, SUPERVISION, unknown};
use bloc_planning_domain::{
    Assignment, ResourceId, Severity, StaffProfile, SuggestedAction, Violation,
    format_day_month, overlaps,
};
use std::collections::BTreeSet;
use time::Date;

/// An intern on a slot needs a senior co-assigned to the same resource and
/// period, unless exempt.
///
/// Every (resource, date) touched by the proposal is re-checked, so adding
/// a senior clears the violation and removing one raises it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupervisionRule;

impl Rule for SupervisionRule {
    fn id(&self) -> &str {
        SUPERVISION
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Supervision
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Vec<Violation> {
        let touched: BTreeSet<(&ResourceId, Date)> = ctx
            .proposal
            .proposed()
            .into_iter()
            .chain(ctx.proposal.removed())
            .map(|a| (&a.resource_id, a.date))
            .collect();

        let mut violations: Vec<Violation> = Vec::new();
        for (resource_id, date) in touched {
            for candidate in ctx.plan.on_date(date).filter(|a| &a.resource_id == resource_id) {
                let Some(profile) = ctx.snapshot.staff_profile(&candidate.staff_id) else {
                    if ctx.plan.is_proposed(&candidate.id) {
                        violations.push(unknown(
                            SUPERVISION,
                            candidate,
                            &format!("Staff profile '{}'", candidate.staff_id),
                        ));
                    }
                    continue;
                };
                if !profile.role.requires_supervision() || profile.supervision_exempt {
                    continue;
                }
                if is_supervised(ctx, candidate) {
                    continue;
                }
                violations.push(unsupervised(ctx, candidate, profile));
            }
        }

        violations
    }
}

fn is_supervised(ctx: &EvaluationContext<'_>, intern: &Assignment) -> bool {
    ctx.plan
        .on_date(intern.date)
        .filter(|other| other.id != intern.id && other.resource_id == intern.resource_id)
        .filter(|other| overlaps(other.slot(), intern.slot()))
        .any(|other| {
            ctx.snapshot
                .staff_profile(&other.staff_id)
                .is_some_and(|p| p.role.provides_supervision())
        })
}

fn unsupervised(
    ctx: &EvaluationContext<'_>,
    intern: &Assignment,
    profile: &StaffProfile,
) -> Violation {
    let suggestions: Vec<SuggestedAction> = ctx
        .snapshot
        .staff
        .iter()
        .filter(|p| p.role.provides_supervision())
        .filter(|p| ctx.is_available(&p.id, intern.slot()))
        .take(ctx.config.resolver.max_suggestions)
        .map(|p| SuggestedAction::AssignStaff {
            staff_id: p.id.clone(),
            reason: format!("{} is a senior available on this slot", p.display_name),
        })
        .collect();

    let severity: Severity = ctx.config.supervision.severity;
    Violation::new(
        SUPERVISION,
        severity,
        format!(
            "{} ({}) has no senior co-assigned in {} on {} {}",
            profile.display_name,
            profile.role,
            ctx.snapshot.resource_name(&intern.resource_id),
            format_day_month(intern.date),
            intern.shift_period
        ),
    )
    .affecting(intern.id.value())
    .affecting(intern.staff_id.value())
    .with_suggestions(suggestions)
}
