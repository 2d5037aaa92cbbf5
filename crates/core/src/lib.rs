// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Business-rule validation for operating-room staff planning.
//!
//! A [`ValidationEngine`] runs an ordered [`RuleSet`] against a
//! [`Proposal`] and a [`Snapshot`] of existing planning data, producing a
//! `ValidationResult`. The engine also searches ranked alternatives for
//! blocking violations.

mod condition;
mod config;
mod engine;
mod error;
mod metrics;
mod plan;
mod proposal;
mod resolver;
mod rule_conflicts;
mod rule_set;
mod rules;
mod snapshot;

#[cfg(test)]
mod tests;

pub use condition::{
    AssignmentFacts, Condition, ConditionField, ConditionOperator, ConditionValue,
    CustomRuleDefinition, RuleScope,
};
pub use config::{
    ConsecutiveDaysConfig, CustomRulesConfig, EngineConfig, GuardIntervalConfig, MAX_REST_HOURS,
    MinimumStaffingConfig, ResolverConfig, RestTimeConfig, RuleConfig, SupervisionConfig,
    WeeklyHoursConfig,
};
pub use engine::ValidationEngine;
pub use error::{CoreError, SnapshotError};
pub use plan::PlanView;
pub use proposal::Proposal;
pub use resolver::Suggestion;
pub use rule_conflicts::{ConflictKind, RuleConflict, detect_conflicts};
pub use rule_set::RuleSet;
pub use rules::{
    CONSECUTIVE_DAYS, ConsecutiveDaysRule, CustomRule, DOUBLE_BOOKING, DoubleBookingRule,
    EvaluationContext, GUARD_INTERVAL, GuardIntervalRule, LEAVE_CONFLICT, LeaveConflictRule,
    MINIMUM_STAFFING, MinimumStaffingRule, QUALIFICATION, QualificationRule, REST_TIME,
    RestTimeRule, Rule, RuleCategory, SUPERVISION, SupervisionRule, WEEKLY_HOURS,
    WeeklyHoursRule,
};
pub use snapshot::{DateRange, Snapshot, SnapshotProvider};
