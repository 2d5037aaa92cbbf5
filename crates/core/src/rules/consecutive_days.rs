// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{CONSECUTIVE_DAYS, EvaluationContext, Rule, RuleCategory};
use crate::config::ConsecutiveDaysConfig;
use bloc_planning_domain::{StaffId, Violation, format_day_month};
use std::collections::BTreeSet;
use time::Date;

/// A staff member may not work more than a configured number of dates in a
/// row. Any assignment on a date counts that date as worked.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsecutiveDaysRule;

impl Rule for ConsecutiveDaysRule {
    fn id(&self) -> &str {
        CONSECUTIVE_DAYS
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Workload
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Vec<Violation> {
        let settings: &ConsecutiveDaysConfig = &ctx.config.consecutive_days;

        // runs already reported, keyed by their first date
        let mut reported: BTreeSet<(&StaffId, Date)> = BTreeSet::new();
        let mut violations: Vec<Violation> = Vec::new();

        for subject in ctx.plan.proposed() {
            let staff_id: &StaffId = &subject.staff_id;
            if !ctx.plan.works_on(staff_id, subject.date) {
                continue;
            }

            let mut first: Date = subject.date;
            while let Some(day) = first
                .previous_day()
                .filter(|d| ctx.plan.works_on(staff_id, *d))
            {
                first = day;
            }
            let mut last: Date = subject.date;
            while let Some(day) = last.next_day().filter(|d| ctx.plan.works_on(staff_id, *d)) {
                last = day;
            }

            let length: i64 = (last - first).whole_days() + 1;
            if length <= i64::from(settings.max_consecutive_days)
                || !reported.insert((staff_id, first))
            {
                continue;
            }

            violations.push(
                Violation::new(
                    CONSECUTIVE_DAYS,
                    settings.severity,
                    format!(
                        "{} would work {length} consecutive days from {} to {}, above the limit of {}",
                        ctx.snapshot.staff_name(staff_id),
                        format_day_month(first),
                        format_day_month(last),
                        settings.max_consecutive_days
                    ),
                )
                .affecting(subject.id.value())
                .affecting(staff_id.value()),
            );
        }

        violations
    }
}
