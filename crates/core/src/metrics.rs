// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::rules::EvaluationContext;
use bloc_planning_domain::{StaffId, ValidationMetrics, iso_week_key};
use std::collections::BTreeMap;
use time::Date;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the scores attached to every validation result.
pub(crate) fn compute(ctx: &EvaluationContext<'_>) -> ValidationMetrics {
    ValidationMetrics {
        equity_score: equity_score(ctx),
        fatigue_score: fatigue_score(ctx),
    }
}

/// Highest weekly load among staff touched by the proposal, as a
/// percentage of their budget.
fn fatigue_score(ctx: &EvaluationContext<'_>) -> f64 {
    let mut weeks: BTreeMap<(&StaffId, (i32, u8)), Date> = BTreeMap::new();
    for subject in ctx.plan.proposed() {
        weeks
            .entry((&subject.staff_id, iso_week_key(subject.date)))
            .or_insert(subject.date);
    }

    let mut highest: f64 = 0.0;
    for ((staff_id, _), date) in weeks {
        let budget: u32 = ctx
            .snapshot
            .staff_profile(staff_id)
            .and_then(|p| p.weekly_hour_budget)
            .unwrap_or(ctx.config.weekly_hours.default_budget_hours);
        if budget == 0 {
            continue;
        }
        let total: u32 = ctx
            .plan
            .staff_in_week(staff_id, date)
            .iter()
            .map(|a| a.hours())
            .sum();
        highest = highest.max(f64::from(total) / f64::from(budget) * 100.0);
    }

    round2(highest)
}

/// How evenly heavy duties (nights, guards, on-call) are spread among the
/// staff holding assignments: 100 × min / max, 100 when nobody has one.
fn equity_score(ctx: &EvaluationContext<'_>) -> f64 {
    let mut heavy: BTreeMap<&StaffId, u32> = BTreeMap::new();
    for assignment in ctx.plan.assignments() {
        let count: &mut u32 = heavy.entry(&assignment.staff_id).or_insert(0);
        if assignment.shift_period.is_heavy_duty() {
            *count += 1;
        }
    }

    let max: u32 = heavy.values().copied().max().unwrap_or(0);
    if max == 0 {
        return 100.0;
    }
    let min: u32 = heavy.values().copied().min().unwrap_or(0);

    round2(100.0 * f64::from(min) / f64::from(max))
}
