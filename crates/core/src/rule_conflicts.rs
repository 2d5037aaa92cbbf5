// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Overlap detection between custom rule definitions.
//!
//! Two enabled definitions with the same scope and the same conditions
//! count the same assignments. If their limits or severities differ, the
//! stricter one always wins and the other is dead configuration; if they
//! agree, one of them is a duplicate.

use crate::condition::{Condition, ConditionOperator, ConditionValue, CustomRuleDefinition};
use std::fmt;

/// How two overlapping definitions disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Same limit and severity.
    Duplicate,
    /// Different limits for the same assignments.
    DifferentLimits,
    /// Same limit, different severities.
    DifferentSeverities,
}

/// A pair of custom definitions that count the same assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConflict {
    /// Id of the definition listed first.
    pub first: String,
    /// Id of the definition listed second.
    pub second: String,
    /// What differs between them.
    pub kind: ConflictKind,
}

impl fmt::Display for RuleConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail: &str = match self.kind {
            ConflictKind::Duplicate => "are duplicates",
            ConflictKind::DifferentLimits => "set different limits",
            ConflictKind::DifferentSeverities => "set different severities",
        };
        write!(
            f,
            "Custom rules '{}' and '{}' match the same assignments and {detail}",
            self.first, self.second
        )
    }
}

/// Pairs of enabled definitions with the same scope and equivalent
/// conditions, in definition order.
///
/// Text comparison ignores ASCII case, list order and repeated list items.
/// A one-item list is the same test as an equality.
#[must_use]
pub fn detect_conflicts(definitions: &[CustomRuleDefinition]) -> Vec<RuleConflict> {
    let keyed: Vec<(&CustomRuleDefinition, Vec<String>)> = definitions
        .iter()
        .filter(|d| d.enabled)
        .map(|d| (d, definition_key(d)))
        .collect();

    let mut conflicts: Vec<RuleConflict> = Vec::new();
    for (index, (first, first_key)) in keyed.iter().enumerate() {
        for (second, second_key) in keyed.iter().skip(index + 1) {
            if first.scope != second.scope || first_key != second_key {
                continue;
            }
            let kind: ConflictKind = if first.limit != second.limit {
                ConflictKind::DifferentLimits
            } else if first.severity != second.severity {
                ConflictKind::DifferentSeverities
            } else {
                ConflictKind::Duplicate
            };
            conflicts.push(RuleConflict {
                first: first.id.clone(),
                second: second.id.clone(),
                kind,
            });
        }
    }
    conflicts
}

fn definition_key(definition: &CustomRuleDefinition) -> Vec<String> {
    let mut keys: Vec<String> = definition.conditions.iter().map(condition_key).collect();
    keys.sort();
    keys.dedup();
    keys
}

fn condition_key(condition: &Condition) -> String {
    let (operator, value): (ConditionOperator, String) = match (&condition.operator, &condition.value)
    {
        (ConditionOperator::In, ConditionValue::List(items)) => {
            let mut items: Vec<String> = items.iter().map(|i| i.to_ascii_lowercase()).collect();
            items.sort();
            items.dedup();
            if let [single] = items.as_slice() {
                (ConditionOperator::Equals, single.clone())
            } else {
                (ConditionOperator::In, items.join("\u{1f}"))
            }
        }
        (operator, ConditionValue::Text(text)) => (*operator, text.to_ascii_lowercase()),
        (operator, ConditionValue::List(items)) => (*operator, items.join("\u{1f}")),
        (operator, ConditionValue::Number(n)) => (*operator, n.to_string()),
    };
    format!("{} {} {value}", condition.field.as_str(), operator.symbol())
}
