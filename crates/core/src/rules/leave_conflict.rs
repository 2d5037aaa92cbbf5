// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{EvaluationContext, LEAVE_CONFLICT, Rule, RuleCategory};
use bloc_planning_domain::{Severity, Violation};

/// Nobody is planned during their approved leave.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveConflictRule;

impl Rule for LeaveConflictRule {
    fn id(&self) -> &str {
        LEAVE_CONFLICT
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::LeaveConflict
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Vec<Violation> {
        let severity: Severity = ctx.config.leave_conflict.severity;

        ctx.plan
            .proposed()
            .iter()
            .flat_map(|subject| {
                ctx.snapshot
                    .approved_leaves_for(&subject.staff_id)
                    .filter(|leave| leave.contains(subject.date))
                    .map(move |leave| {
                        Violation::new(
                            LEAVE_CONFLICT,
                            severity,
                            format!(
                                "{} is on approved {} leave from {}",
                                ctx.snapshot.staff_name(&subject.staff_id),
                                leave.leave_type,
                                leave.range_label()
                            ),
                        )
                        .affecting(subject.id.value())
                        .affecting(&leave.id)
                        .affecting(subject.staff_id.value())
                    })
            })
            .collect()
    }
}
