// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Properties checked over a fixed grid of planning situations.

use crate::tests::helpers::{
    MONDAY, approved_leave, assign, confirmed, create_test_engine, create_test_snapshot,
    fill_week, validate,
};
use crate::{EngineConfig, Proposal, REST_TIME, RuleSet, Snapshot, ValidationEngine};
use bloc_planning_domain::{Assignment, ShiftPeriod, ValidationResult, Violation, rest_gap_hours};
use time::macros::date;
use time::{Date, Duration};

fn scenarios() -> Vec<(Snapshot, Proposal)> {
    let mut scenarios: Vec<(Snapshot, Proposal)> = Vec::new();

    let mut busy: Snapshot = create_test_snapshot();
    fill_week(&mut busy, "dupont");
    busy.assignments.push(confirmed(
        "night",
        "martin",
        "URG-1",
        date!(2025 - 07 - 06),
        ShiftPeriod::Night,
    ));
    busy.leaves.push(approved_leave(
        "leave-1",
        "senior",
        date!(2025 - 07 - 08),
        date!(2025 - 07 - 10),
    ));

    for (index, period) in ShiftPeriod::ALL.iter().enumerate() {
        for staff in ["durand", "dupont", "martin", "senior", "ghost"] {
            for resource in ["ROOM-A", "ROOM-C", "URG-1"] {
                let offset: i64 = i64::try_from(index).unwrap() % 4;
                let day: Date = MONDAY.saturating_add(Duration::days(offset));
                scenarios.push((
                    busy.clone(),
                    Proposal::Assign(assign("p-1", staff, resource, day, *period)),
                ));
            }
        }
    }

    scenarios.push((
        busy.clone(),
        Proposal::Batch(vec![
            assign("p-1", "durand", "ROOM-B", MONDAY, ShiftPeriod::Morning),
            assign("p-2", "martin", "ROOM-B", MONDAY, ShiftPeriod::Morning),
            assign("p-3", "martin", "ROOM-C", MONDAY, ShiftPeriod::Morning),
        ]),
    ));
    scenarios.push((
        busy.clone(),
        Proposal::Remove {
            assignment: busy.assignments[0].clone(),
            admin_override: false,
        },
    ));

    scenarios
}

#[test]
fn test_validation_is_deterministic() {
    let engine: ValidationEngine = create_test_engine();

    for (snapshot, proposal) in scenarios() {
        let first: String =
            serde_json::to_string(&validate(&engine, &proposal, &snapshot)).unwrap();
        let second: String =
            serde_json::to_string(&validate(&engine, &proposal, &snapshot)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_valid_iff_no_blocking_violation() {
    let engine: ValidationEngine = create_test_engine();

    for (snapshot, proposal) in scenarios() {
        let result: ValidationResult = validate(&engine, &proposal, &snapshot);
        assert_eq!(result.valid, result.blocking().next().is_none());
    }
}

#[test]
fn test_disabling_a_rule_only_removes_violations() {
    let full: ValidationEngine = create_test_engine();
    let ids: Vec<String> = full
        .rule_set()
        .ids()
        .into_iter()
        .map(String::from)
        .collect();

    for disabled in &ids {
        let mut rule_set: RuleSet = RuleSet::standard();
        rule_set.disable(disabled);
        let reduced: ValidationEngine = ValidationEngine::new(rule_set, EngineConfig::default());

        for (snapshot, proposal) in scenarios() {
            let all: ValidationResult = validate(&full, &proposal, &snapshot);
            let fewer: ValidationResult = validate(&reduced, &proposal, &snapshot);

            assert!(!fewer.has_rule(disabled));
            for violation in &fewer.violations {
                assert!(all.violations.contains(violation), "{violation:?}");
            }
            // fewer rules can only make a proposal more acceptable
            assert!(fewer.valid || !all.valid);
        }
    }
}

#[test]
fn test_rest_violation_matches_gap_after_guard() {
    let engine: ValidationEngine = create_test_engine();
    let guard: Assignment = confirmed(
        "guard",
        "martin",
        "URG-1",
        date!(2025 - 07 - 06),
        ShiftPeriod::Guard24h,
    );
    let mut snapshot: Snapshot = create_test_snapshot();
    snapshot.assignments.push(guard.clone());
    let minimum: f64 = engine.config().rest_time.minimum_rest_hours;

    for offset in 1..=2 {
        let day: Date = guard.date.saturating_add(Duration::days(offset));
        for period in ShiftPeriod::ALL {
            let next: Assignment = assign("next", "martin", "ROOM-A", day, period);
            if next.slot().start() < guard.slot().end() {
                continue;
            }

            let result: ValidationResult =
                validate(&engine, &Proposal::Assign(next.clone()), &snapshot);

            let gap: f64 = rest_gap_hours(guard.slot(), next.slot());
            assert_eq!(
                result.has_rule(REST_TIME),
                gap < minimum,
                "{period} on {day}: gap {gap}"
            );
        }
    }
}

#[test]
fn test_removal_never_adds_assignment_rules() {
    let engine: ValidationEngine = create_test_engine();
    let (snapshot, _) = scenarios().swap_remove(0);

    for existing in &snapshot.assignments {
        let result: ValidationResult = validate(
            &engine,
            &Proposal::Remove {
                assignment: existing.clone(),
                admin_override: false,
            },
            &snapshot,
        );
        let unexpected: Vec<&Violation> = result
            .violations
            .iter()
            .filter(|v| v.rule_id != "minimum-staffing" && v.rule_id != "supervision")
            .collect();
        assert!(unexpected.is_empty(), "{unexpected:?}");
    }
}
