// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{EvaluationContext, MINIMUM_STAFFING, Rule, RuleCategory, unknown};
use bloc_planning_domain::{ResourceId, Severity, StaffId, Violation, format_day_month, overlaps};
use std::collections::BTreeSet;

/// Removing an assignment must not leave its sector below the staffing
/// minimum for that period.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumStaffingRule;

impl Rule for MinimumStaffingRule {
    fn id(&self) -> &str {
        MINIMUM_STAFFING
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::StaffingMinimum
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Vec<Violation> {
        let Some(removed) = ctx.proposal.removed() else {
            return Vec::new();
        };

        let Some(resource) = ctx.snapshot.resource(&removed.resource_id) else {
            return vec![unknown(
                MINIMUM_STAFFING,
                removed,
                &format!("Resource '{}'", removed.resource_id),
            )];
        };
        let Some(sector) = ctx.snapshot.sector(&resource.sector_id) else {
            return vec![unknown(
                MINIMUM_STAFFING,
                removed,
                &format!("Sector '{}'", resource.sector_id),
            )];
        };

        let sector_resources: BTreeSet<&ResourceId> = ctx
            .snapshot
            .resources
            .iter()
            .filter(|r| r.sector_id == sector.id)
            .map(|r| &r.id)
            .collect();

        let remaining: BTreeSet<&StaffId> = ctx
            .plan
            .on_date(removed.date)
            .filter(|a| sector_resources.contains(&a.resource_id))
            .filter(|a| overlaps(a.slot(), removed.slot()))
            .map(|a| &a.staff_id)
            .collect();
        let count: u32 = u32::try_from(remaining.len()).unwrap_or(u32::MAX);

        if count >= sector.minimum_staff {
            return Vec::new();
        }

        let severity: Severity = if ctx.proposal.admin_override() {
            ctx.config.minimum_staffing.override_severity
        } else {
            ctx.config.minimum_staffing.severity
        };

        vec![
            Violation::new(
                MINIMUM_STAFFING,
                severity,
                format!(
                    "Removing assignment {} leaves {} at {count}/{} staff on {} {}, {} required",
                    removed.id,
                    sector.name,
                    sector.minimum_staff,
                    format_day_month(removed.date),
                    removed.shift_period,
                    sector.minimum_staff
                ),
            )
            .affecting(removed.id.value())
            .affecting(sector.id.value()),
        ]
    }
}
