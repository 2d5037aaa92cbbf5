// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{EvaluationContext, QUALIFICATION, Rule, RuleCategory, unknown};
use bloc_planning_domain::{
    Assignment, Resource, Severity, StaffProfile, SuggestedAction, Violation,
};

/// Staff must hold at least one qualification the resource requires.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualificationRule;

impl Rule for QualificationRule {
    fn id(&self) -> &str {
        QUALIFICATION
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Skill
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Vec<Violation> {
        let mut violations: Vec<Violation> = Vec::new();

        for subject in ctx.plan.proposed() {
            let Some(resource) = ctx.snapshot.resource(&subject.resource_id) else {
                violations.push(unknown(
                    QUALIFICATION,
                    subject,
                    &format!("Resource '{}'", subject.resource_id),
                ));
                continue;
            };
            if resource.required_qualifications.is_empty() {
                continue;
            }
            let Some(profile) = ctx.snapshot.staff_profile(&subject.staff_id) else {
                violations.push(unknown(
                    QUALIFICATION,
                    subject,
                    &format!("Staff profile '{}'", subject.staff_id),
                ));
                continue;
            };
            if profile.has_any_qualification(&resource.required_qualifications) {
                continue;
            }

            violations.push(mismatch(ctx, subject, profile, resource));
        }

        violations
    }
}

fn mismatch(
    ctx: &EvaluationContext<'_>,
    subject: &Assignment,
    profile: &StaffProfile,
    resource: &Resource,
) -> Violation {
    let required: &[String] = &resource.required_qualifications;
    let suggestions: Vec<SuggestedAction> = ctx
        .snapshot
        .staff
        .iter()
        .filter(|candidate| candidate.id != subject.staff_id)
        .filter(|candidate| candidate.has_any_qualification(required))
        .filter(|candidate| ctx.is_available(&candidate.id, subject.slot()))
        .take(ctx.config.resolver.max_suggestions)
        .map(|candidate| {
            let held: Vec<&str> = required
                .iter()
                .filter(|q| candidate.qualifications.contains(*q))
                .map(String::as_str)
                .collect();
            SuggestedAction::AssignStaff {
                staff_id: candidate.id.clone(),
                reason: format!("Holds {}", held.join(", ")),
            }
        })
        .collect();

    let severity: Severity = ctx.config.qualification.severity;
    Violation::new(
        QUALIFICATION,
        severity,
        format!(
            "{} holds none of the qualifications required by {}: {}",
            profile.display_name,
            resource.name,
            required.join(", ")
        ),
    )
    .affecting(subject.id.value())
    .affecting(subject.staff_id.value())
    .with_suggestions(suggestions)
}
