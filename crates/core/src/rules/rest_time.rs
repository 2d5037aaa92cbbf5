// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{EvaluationContext, REST_TIME, Rule, RuleCategory};
use bloc_planning_domain::{
    Assignment, Severity, Slot, SuggestedAction, Violation, format_day_month,
    next_permissible_slot, rest_gap_hours,
};

/// Nights and guards must be followed by a minimum rest before the same
/// staff member's next assignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestTimeRule;

impl Rule for RestTimeRule {
    fn id(&self) -> &str {
        REST_TIME
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::RestTime
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Vec<Violation> {
        let minimum: f64 = ctx.config.rest_time.minimum_rest_hours;
        let scan_days: u32 = ctx.config.rest_time.scan_days();
        let mut violations: Vec<Violation> = Vec::new();

        for subject in ctx.plan.proposed() {
            for other in ctx.plan.staff_around(&subject.staff_id, subject.date, scan_days) {
                if other.id == subject.id
                    || (ctx.plan.is_proposed(&other.id) && other.id < subject.id)
                {
                    continue;
                }

                let (earlier, later): (&Assignment, &Assignment) =
                    if other.slot().end() <= subject.slot().start() {
                        (other, subject)
                    } else if subject.slot().end() <= other.slot().start() {
                        (subject, other)
                    } else {
                        continue;
                    };

                if !earlier.shift_period.requires_rest() {
                    continue;
                }

                let gap: f64 = rest_gap_hours(earlier.slot(), later.slot());
                if gap >= minimum {
                    continue;
                }

                violations.push(short_rest(ctx, subject, other, earlier, gap, minimum));
            }
        }

        violations
    }
}

fn short_rest(
    ctx: &EvaluationContext<'_>,
    subject: &Assignment,
    other: &Assignment,
    earlier: &Assignment,
    gap: f64,
    minimum: f64,
) -> Violation {
    let next: Slot = next_permissible_slot(earlier.slot().end(), minimum);
    let severity: Severity = ctx.config.rest_time.severity;

    Violation::new(
        REST_TIME,
        severity,
        format!(
            "{} gets {gap:.1}h of rest after the {} of {}, less than the {minimum:.1}h minimum; next permissible slot is {} {}",
            ctx.snapshot.staff_name(&subject.staff_id),
            earlier.shift_period,
            format_day_month(earlier.date),
            format_day_month(next.date),
            next.period
        ),
    )
    .affecting(subject.id.value())
    .affecting(other.id.value())
    .affecting(subject.staff_id.value())
    .with_suggestions(vec![SuggestedAction::MoveToSlot {
        date: next.date,
        shift_period: next.period,
        resource_id: None,
    }])
}
