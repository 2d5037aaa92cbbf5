// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{EvaluationContext, GUARD_INTERVAL, Rule, RuleCategory};
use crate::config::GuardIntervalConfig;
use bloc_planning_domain::{
    Assignment, ShiftPeriod, StaffId, Violation, format_day_month, month_bounds,
};
use std::collections::BTreeMap;
use time::Date;

/// Guards of one staff member must be spaced out, and capped per calendar
/// month.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardIntervalRule;

impl Rule for GuardIntervalRule {
    fn id(&self) -> &str {
        GUARD_INTERVAL
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Workload
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Vec<Violation> {
        let settings: &GuardIntervalConfig = &ctx.config.guard_interval;
        let guards: Vec<&Assignment> = ctx
            .plan
            .proposed()
            .iter()
            .filter(|a| a.shift_period == ShiftPeriod::Guard24h)
            .collect();

        let mut violations: Vec<Violation> = Vec::new();
        if settings.min_days_between_guards > 0 {
            let window: u32 = settings.min_days_between_guards - 1;
            for &subject in &guards {
                for other in ctx.plan.staff_around(&subject.staff_id, subject.date, window) {
                    if other.id == subject.id
                        || other.shift_period != ShiftPeriod::Guard24h
                        || (ctx.plan.is_proposed(&other.id) && other.id < subject.id)
                    {
                        continue;
                    }
                    violations.push(too_close(ctx, subject, other));
                }
            }
        }

        // one count per (staff, month), reported on the first guard
        let mut months: BTreeMap<(&StaffId, i32, u8), &Assignment> = BTreeMap::new();
        for &subject in &guards {
            months
                .entry((&subject.staff_id, subject.date.year(), u8::from(subject.date.month())))
                .or_insert(subject);
        }

        for ((staff_id, year, _), subject) in months {
            let (first, last): (Date, Date) = month_bounds(subject.date);
            let count: usize = ctx
                .plan
                .staff_between(staff_id, first, last)
                .into_iter()
                .filter(|a| a.shift_period == ShiftPeriod::Guard24h)
                .count();
            if count <= usize::try_from(settings.max_guards_per_month).unwrap_or(usize::MAX) {
                continue;
            }

            violations.push(
                Violation::new(
                    GUARD_INTERVAL,
                    settings.severity,
                    format!(
                        "{} would hold {count} guards in {month} {year}, above the limit of {}",
                        ctx.snapshot.staff_name(staff_id),
                        settings.max_guards_per_month,
                        month = subject.date.month(),
                    ),
                )
                .affecting(subject.id.value())
                .affecting(staff_id.value()),
            );
        }

        violations
    }
}

fn too_close(ctx: &EvaluationContext<'_>, subject: &Assignment, other: &Assignment) -> Violation {
    let settings: &GuardIntervalConfig = &ctx.config.guard_interval;
    let days: u64 = (subject.date - other.date).whole_days().unsigned_abs();
    let (earlier, later): (Date, Date) = if other.date <= subject.date {
        (other.date, subject.date)
    } else {
        (subject.date, other.date)
    };

    Violation::new(
        GUARD_INTERVAL,
        settings.severity,
        format!(
            "{} would hold guards on {} and {}, {days} day(s) apart; at least {} required",
            ctx.snapshot.staff_name(&subject.staff_id),
            format_day_month(earlier),
            format_day_month(later),
            settings.min_days_between_guards
        ),
    )
    .affecting(subject.id.value())
    .affecting(other.id.value())
    .affecting(subject.staff_id.value())
}
