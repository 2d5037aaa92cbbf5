// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{DOUBLE_BOOKING, EvaluationContext, Rule, RuleCategory};
use bloc_planning_domain::{Assignment, Severity, Violation, format_day_month, overlaps};

/// A staff member can hold only one slot at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleBookingRule;

impl Rule for DoubleBookingRule {
    fn id(&self) -> &str {
        DOUBLE_BOOKING
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::DoubleBooking
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Vec<Violation> {
        let severity: Severity = ctx.config.double_booking.severity;
        let mut violations: Vec<Violation> = Vec::new();

        for subject in ctx.plan.proposed() {
            let clashes = ctx
                .plan
                .staff_around(&subject.staff_id, subject.date, 1)
                .into_iter()
                .filter(|other| other.id != subject.id)
                .filter(|other| overlaps(subject.slot(), other.slot()))
                // two proposal members clashing are reported once
                .filter(|other| !(ctx.plan.is_proposed(&other.id) && other.id < subject.id));

            for other in clashes {
                violations.push(clash(ctx, subject, other, severity));
            }
        }

        violations
    }
}

fn clash(
    ctx: &EvaluationContext<'_>,
    subject: &Assignment,
    other: &Assignment,
    severity: Severity,
) -> Violation {
    Violation::new(
        DOUBLE_BOOKING,
        severity,
        format!(
            "{} is already assigned to {} on {} {} (assignment {})",
            ctx.snapshot.staff_name(&subject.staff_id),
            ctx.snapshot.resource_name(&other.resource_id),
            format_day_month(other.date),
            other.shift_period,
            other.id
        ),
    )
    .affecting(subject.id.value())
    .affecting(other.id.value())
    .affecting(subject.staff_id.value())
}
