// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{EvaluationContext, Rule, RuleCategory, WEEKLY_HOURS, unknown};
use crate::config::WeeklyHoursConfig;
use bloc_planning_domain::{Assignment, Severity, StaffId, Violation, iso_week_key};
use std::collections::BTreeMap;

/// Hours planned in an ISO week must stay within the staff member's budget
/// (warning) and the hard ceiling (escalated).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeeklyHoursRule;

impl Rule for WeeklyHoursRule {
    fn id(&self) -> &str {
        WEEKLY_HOURS
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Workload
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Vec<Violation> {
        let settings: &WeeklyHoursConfig = &ctx.config.weekly_hours;

        // one check per (staff, ISO week), reported on the first member
        let mut weeks: BTreeMap<(&StaffId, (i32, u8)), &Assignment> = BTreeMap::new();
        for subject in ctx.plan.proposed() {
            weeks
                .entry((&subject.staff_id, iso_week_key(subject.date)))
                .or_insert(subject);
        }

        let mut violations: Vec<Violation> = Vec::new();
        for ((staff_id, (year, week)), subject) in weeks {
            let Some(profile) = ctx.snapshot.staff_profile(staff_id) else {
                violations.push(unknown(
                    WEEKLY_HOURS,
                    subject,
                    &format!("Staff profile '{staff_id}'"),
                ));
                continue;
            };

            let budget: u32 = profile
                .weekly_hour_budget
                .unwrap_or(settings.default_budget_hours);
            let total: u32 = ctx
                .plan
                .staff_in_week(staff_id, subject.date)
                .iter()
                .map(|a| a.hours())
                .sum();

            let (severity, limit, label): (Severity, u32, &str) =
                if total > settings.hard_ceiling_hours {
                    (settings.ceiling_severity, settings.hard_ceiling_hours, "hard ceiling")
                } else if total > budget {
                    (settings.severity, budget, "weekly budget")
                } else {
                    continue;
                };

            violations.push(
                Violation::new(
                    WEEKLY_HOURS,
                    severity,
                    format!(
                        "{} would work {total}h in week {week} of {year}, above the {limit}h {label}",
                        profile.display_name
                    ),
                )
                .affecting(subject.id.value())
                .affecting(staff_id.value()),
            );
        }

        violations
    }
}
