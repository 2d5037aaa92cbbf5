// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Violation reporting shapes shared by the validation engine and the
//! quota ledger.
//!
//! A `ValidationResult` is produced fresh for every call and is never a
//! source of truth. It serializes to the JSON consumed unmodified by HTTP
//! handlers.

use crate::calendar::ShiftPeriod;
use crate::types::{ResourceId, StaffId};
use serde::{Deserialize, Serialize};
use time::Date;

/// How serious a violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Shown to the planner, does not prevent saving.
    Warning,
    /// Prevents saving.
    Blocking,
    /// The rule could not be evaluated because data was missing.
    Unknown,
}

impl Severity {
    /// Converts this severity to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Blocking => "BLOCKING",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Whether this severity prevents saving.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Blocking)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A corrective action offered alongside a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SuggestedAction {
    /// Assign (or substitute) another staff member.
    #[serde(rename_all = "camelCase")]
    AssignStaff {
        /// The staff member to involve.
        staff_id: StaffId,
        /// Why this staff member fits.
        reason: String,
    },
    /// Move the assignment to another slot.
    #[serde(rename_all = "camelCase")]
    MoveToSlot {
        /// Target date.
        date: Date,
        /// Target period.
        shift_period: ShiftPeriod,
        /// Target resource, when it differs from the original.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resource_id: Option<ResourceId>,
    },
}

/// A single rule violation.
///
/// By convention the first entry of `affected_entity_ids` is the id of the
/// assignment the violation was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// The rule that raised the violation.
    pub rule_id: String,
    /// The severity.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Assignments, staff members and other entities involved.
    #[serde(default)]
    pub affected_entity_ids: Vec<String>,
    /// Corrective actions, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_actions: Vec<SuggestedAction>,
}

impl Violation {
    /// Creates a violation with no affected entities or suggestions.
    #[must_use]
    pub fn new(rule_id: &str, severity: Severity, message: String) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message,
            affected_entity_ids: Vec::new(),
            suggested_actions: Vec::new(),
        }
    }

    /// Appends an affected entity id, returning the updated violation.
    #[must_use]
    pub fn affecting(mut self, entity_id: &str) -> Self {
        if !self.affected_entity_ids.iter().any(|id| id == entity_id) {
            self.affected_entity_ids.push(entity_id.to_string());
        }
        self
    }

    /// Replaces the suggested actions, returning the updated violation.
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<SuggestedAction>) -> Self {
        self.suggested_actions = suggestions;
        self
    }

    /// The assignment this violation was raised for.
    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.affected_entity_ids.first().map(String::as_str)
    }
}

/// Scores computed alongside every validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMetrics {
    /// 100 when heavy duties are evenly spread, lower otherwise.
    pub equity_score: f64,
    /// Highest weekly load among touched staff, as a percentage of budget.
    pub fatigue_score: f64,
}

/// The aggregated outcome of a validation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff no violation is blocking.
    pub valid: bool,
    /// Violations in deterministic rule order.
    pub violations: Vec<Violation>,
    /// Computed scores.
    pub metrics: ValidationMetrics,
}

impl ValidationResult {
    /// Builds a result, deriving `valid` from the violations.
    #[must_use]
    pub fn new(violations: Vec<Violation>, metrics: ValidationMetrics) -> Self {
        let valid: bool = !violations.iter().any(|v| v.severity.is_blocking());
        Self {
            valid,
            violations,
            metrics,
        }
    }

    /// Blocking violations, in order.
    pub fn blocking(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity.is_blocking())
    }

    /// Violations raised by one rule, in order.
    pub fn by_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| v.rule_id == rule_id)
    }

    /// Whether any violation was raised by `rule_id`.
    #[must_use]
    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.by_rule(rule_id).next().is_some()
    }
}
