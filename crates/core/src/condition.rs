// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Declarative custom rules.
//!
//! A custom rule is a list of conditions over a closed set of assignment
//! fields and operators, a grouping scope and a numeric limit. Conditions
//! are written as short strings such as `activityKind = "complex surgery"`
//! or `shiftPeriod in [NIGHT, GUARD_24H]`; anything outside the grammar is
//! rejected when the definition is loaded and never evaluated.

use crate::error::CoreError;
use bloc_planning_domain::{ResourceId, SectorId, Severity, ShiftPeriod, StaffRole};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Assignment fields a condition can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionField {
    /// The assignment's activity label.
    ActivityKind,
    /// The shift period.
    ShiftPeriod,
    /// The room or service.
    ResourceId,
    /// The sector of the room or service.
    SectorId,
    /// The role of the assigned staff member.
    StaffRole,
    /// Hours of the shift period.
    Hours,
}

impl ConditionField {
    /// Converts this field to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ActivityKind => "activityKind",
            Self::ShiftPeriod => "shiftPeriod",
            Self::ResourceId => "resourceId",
            Self::SectorId => "sectorId",
            Self::StaffRole => "staffRole",
            Self::Hours => "hours",
        }
    }

    const fn is_numeric(self) -> bool {
        matches!(self, Self::Hours)
    }
}

impl FromStr for ConditionField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activityKind" => Ok(Self::ActivityKind),
            "shiftPeriod" => Ok(Self::ShiftPeriod),
            "resourceId" => Ok(Self::ResourceId),
            "sectorId" => Ok(Self::SectorId),
            "staffRole" => Ok(Self::StaffRole),
            "hours" => Ok(Self::Hours),
            other => Err(format!("unknown field '{other}'")),
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionOperator {
    /// Equality, case-insensitive for text.
    Equals,
    /// Membership in a list.
    In,
    /// Greater than or equal (numeric fields).
    Gte,
    /// Less than or equal (numeric fields).
    Lte,
}

impl ConditionOperator {
    /// The operator as written in condition strings.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::In => "in",
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }
}

/// The right-hand side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    /// A single text value.
    Text(String),
    /// A list of text values.
    List(Vec<String>),
    /// A number.
    Number(f64),
}

/// The facts about one assignment that conditions are evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentFacts<'a> {
    /// Activity label, if any.
    pub activity_kind: Option<&'a str>,
    /// Shift period.
    pub shift_period: ShiftPeriod,
    /// Resource.
    pub resource_id: &'a ResourceId,
    /// Sector, when the resource is known.
    pub sector_id: Option<&'a SectorId>,
    /// Role, when the profile is known.
    pub staff_role: Option<StaffRole>,
    /// Shift hours.
    pub hours: u32,
}

impl AssignmentFacts<'_> {
    fn text(&self, field: ConditionField) -> Option<&str> {
        match field {
            ConditionField::ActivityKind => self.activity_kind,
            ConditionField::ShiftPeriod => Some(self.shift_period.as_str()),
            ConditionField::ResourceId => Some(self.resource_id.value()),
            ConditionField::SectorId => self.sector_id.map(SectorId::value),
            ConditionField::StaffRole => self.staff_role.map(|r| r.as_str()),
            ConditionField::Hours => None,
        }
    }
}

/// A single `field operator value` test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Condition {
    /// Tested field.
    pub field: ConditionField,
    /// Operator.
    pub operator: ConditionOperator,
    /// Expected value.
    pub value: ConditionValue,
}

impl Condition {
    /// Whether the assignment described by `facts` satisfies the condition.
    ///
    /// A condition on data that is missing (unknown sector or role) does
    /// not hold.
    #[must_use]
    pub fn matches(&self, facts: &AssignmentFacts<'_>) -> bool {
        if self.field.is_numeric() {
            let actual: f64 = f64::from(facts.hours);
            return match (&self.operator, &self.value) {
                (ConditionOperator::Equals, ConditionValue::Number(n)) => {
                    (actual - n).abs() < f64::EPSILON
                }
                (ConditionOperator::Gte, ConditionValue::Number(n)) => actual >= *n,
                (ConditionOperator::Lte, ConditionValue::Number(n)) => actual <= *n,
                _ => false,
            };
        }

        let Some(actual) = facts.text(self.field) else {
            return false;
        };
        match (&self.operator, &self.value) {
            (ConditionOperator::Equals, ConditionValue::Text(expected)) => {
                actual.eq_ignore_ascii_case(expected)
            }
            (ConditionOperator::In, ConditionValue::List(options)) => {
                options.iter().any(|o| actual.eq_ignore_ascii_case(o))
            }
            _ => false,
        }
    }

    /// Parses a condition string.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCondition` when the text does not follow
    /// `field operator value` with a known field, an operator valid for
    /// that field and a well-formed value.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let invalid = |reason: String| CoreError::InvalidCondition {
            text: text.to_string(),
            reason,
        };

        let trimmed: &str = text.trim();
        let field_end: usize = trimmed
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(trimmed.len());
        let (field_text, rest) = trimmed.split_at(field_end);
        if field_text.is_empty() {
            return Err(invalid(String::from("missing field")));
        }
        let field: ConditionField = field_text.parse().map_err(invalid)?;

        let rest: &str = rest.trim_start();
        let (operator, value_text): (ConditionOperator, &str) =
            if let Some(v) = rest.strip_prefix(">=") {
                (ConditionOperator::Gte, v)
            } else if let Some(v) = rest.strip_prefix("<=") {
                (ConditionOperator::Lte, v)
            } else if let Some(v) = rest.strip_prefix("==") {
                (ConditionOperator::Equals, v)
            } else if let Some(v) = rest.strip_prefix('=') {
                (ConditionOperator::Equals, v)
            } else {
                let word_end: usize = rest
                    .find(|c: char| !c.is_ascii_alphabetic())
                    .unwrap_or(rest.len());
                let (word, v) = rest.split_at(word_end);
                let operator: ConditionOperator = match word.to_ascii_lowercase().as_str() {
                    "in" => ConditionOperator::In,
                    "equals" => ConditionOperator::Equals,
                    "gte" => ConditionOperator::Gte,
                    "lte" => ConditionOperator::Lte,
                    "" => return Err(invalid(String::from("missing operator"))),
                    other => return Err(invalid(format!("unknown operator '{other}'"))),
                };
                (operator, v)
            };

        let value_text: &str = value_text.trim();
        if value_text.is_empty() {
            return Err(invalid(String::from("missing value")));
        }

        let value: ConditionValue = match operator {
            ConditionOperator::In => {
                if field.is_numeric() {
                    return Err(invalid(format!("'in' is not supported for {}", field.as_str())));
                }
                let inner: &str = value_text
                    .strip_prefix('[')
                    .and_then(|v| v.strip_suffix(']'))
                    .ok_or_else(|| invalid(String::from("expected a [list]")))?;
                let items: Vec<String> = split_list(inner).map_err(invalid)?;
                if items.iter().any(String::is_empty) {
                    return Err(invalid(String::from("empty list item")));
                }
                ConditionValue::List(items)
            }
            ConditionOperator::Gte | ConditionOperator::Lte => {
                if !field.is_numeric() {
                    return Err(invalid(format!(
                        "'{}' needs a numeric field, not {}",
                        operator.symbol(),
                        field.as_str()
                    )));
                }
                ConditionValue::Number(parse_number(value_text).map_err(invalid)?)
            }
            ConditionOperator::Equals => {
                if field.is_numeric() {
                    ConditionValue::Number(parse_number(value_text).map_err(invalid)?)
                } else if is_quoted(value_text) {
                    ConditionValue::Text(unquote(value_text).to_string())
                } else if value_text.contains(char::is_whitespace) {
                    return Err(invalid(String::from("text with spaces must be quoted")));
                } else {
                    ConditionValue::Text(value_text.to_string())
                }
            }
        };

        Ok(Self {
            field,
            operator,
            value,
        })
    }
}

fn is_quoted(text: &str) -> bool {
    text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\'')))
}

fn unquote(text: &str) -> &str {
    if is_quoted(text) {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

// commas inside quotes belong to the item
fn split_list(inner: &str) -> Result<Vec<String>, String> {
    let mut items: Vec<String> = Vec::new();
    let mut current: String = String::new();
    let mut open_quote: Option<char> = None;
    for c in inner.chars() {
        match (open_quote, c) {
            (Some(quote), _) if c == quote => open_quote = None,
            (None, '"' | '\'') => open_quote = Some(c),
            (None, ',') => {
                items.push(unquote(current.trim()).to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    if open_quote.is_some() {
        return Err(String::from("unterminated quote in list"));
    }
    items.push(unquote(current.trim()).to_string());
    Ok(items)
}

fn quoted(text: &str) -> String {
    if text.contains('"') {
        format!("'{text}'")
    } else {
        format!("\"{text}\"")
    }
}

fn parse_number(text: &str) -> Result<f64, String> {
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("'{text}' is not a number"))
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ", self.field.as_str(), self.operator.symbol())?;
        match &self.value {
            ConditionValue::Text(text) => f.write_str(&quoted(text)),
            ConditionValue::List(items) => {
                let items: Vec<String> = items.iter().map(String::as_str).map(quoted).collect();
                write!(f, "[{}]", items.join(", "))
            }
            ConditionValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for Condition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Condition {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.to_string()
    }
}

/// How matching assignments are grouped before counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleScope {
    /// Per staff member and date.
    #[default]
    PerStaffPerDay,
    /// Per staff member and ISO week.
    PerStaffPerWeek,
}

const fn default_enabled() -> bool {
    true
}

const fn default_custom_severity() -> Severity {
    Severity::Warning
}

/// A custom counting rule: at most `limit` assignments matching every
/// condition per staff member and scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRuleDefinition {
    /// Definition identifier; the rule id is `custom:<id>`.
    pub id: String,
    /// Display name used in messages.
    pub name: String,
    /// Conditions that must all hold for an assignment to count.
    pub conditions: Vec<Condition>,
    /// Grouping.
    #[serde(default)]
    pub scope: RuleScope,
    /// Maximum matching assignments per group.
    pub limit: u32,
    /// Severity of a violation.
    #[serde(default = "default_custom_severity")]
    pub severity: Severity,
    /// Disabled definitions are skipped.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl CustomRuleDefinition {
    /// Creates an enabled per-day definition with WARNING severity.
    #[must_use]
    pub fn new(id: &str, name: &str, conditions: Vec<Condition>, limit: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            conditions,
            scope: RuleScope::PerStaffPerDay,
            limit,
            severity: Severity::Warning,
            enabled: true,
        }
    }

    /// The rule id under which violations are reported.
    #[must_use]
    pub fn rule_id(&self) -> String {
        format!("custom:{}", self.id)
    }

    /// Whether every condition holds.
    #[must_use]
    pub fn matches(&self, facts: &AssignmentFacts<'_>) -> bool {
        self.conditions.iter().all(|c| c.matches(facts))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn facts<'a>(resource: &'a ResourceId, activity: Option<&'a str>) -> AssignmentFacts<'a> {
        AssignmentFacts {
            activity_kind: activity,
            shift_period: ShiftPeriod::Night,
            resource_id: resource,
            sector_id: None,
            staff_role: Some(StaffRole::Intern),
            hours: 6,
        }
    }

    #[test]
    fn test_parse_quoted_equals() {
        let condition: Condition = Condition::parse(r#"activityKind = "complex surgery""#).unwrap();

        assert_eq!(condition.field, ConditionField::ActivityKind);
        assert_eq!(condition.operator, ConditionOperator::Equals);
        assert_eq!(
            condition.value,
            ConditionValue::Text(String::from("complex surgery"))
        );
    }

    #[test]
    fn test_parse_list_and_numbers() {
        let list: Condition = Condition::parse("shiftPeriod in [NIGHT, GUARD_24H]").unwrap();
        let hours: Condition = Condition::parse("hours >= 8").unwrap();

        assert_eq!(
            list.value,
            ConditionValue::List(vec![String::from("NIGHT"), String::from("GUARD_24H")])
        );
        assert_eq!(hours.operator, ConditionOperator::Gte);
        assert_eq!(hours.value, ConditionValue::Number(8.0));
    }

    #[test]
    fn test_parse_rejects_free_text() {
        for text in [
            "",
            "interventions.complexity = \"high\"",
            "hours > 8",
            "activityKind >= 3",
            "shiftPeriod in NIGHT",
            "activityKind = complex surgery",
            "staffRole in [SENIOR, ]",
            "hours = lots",
            "drop table",
        ] {
            assert!(Condition::parse(text).is_err(), "accepted '{text}'");
        }
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for text in [
            r#"activityKind = "complex surgery""#,
            "shiftPeriod in [NIGHT, GUARD_24H]",
            "hours <= 4",
        ] {
            let condition: Condition = Condition::parse(text).unwrap();
            assert_eq!(Condition::parse(&condition.to_string()).unwrap(), condition);
        }
    }

    #[test]
    fn test_list_items_may_hold_commas_and_quotes() {
        let condition: Condition =
            Condition::parse(r#"activityKind in ["hip, knee", 'say "hi"', plain]"#).unwrap();

        assert_eq!(
            condition.value,
            ConditionValue::List(vec![
                String::from("hip, knee"),
                String::from(r#"say "hi""#),
                String::from("plain"),
            ])
        );
        assert_eq!(
            condition.to_string(),
            r#"activityKind in ["hip, knee", 'say "hi"', "plain"]"#
        );
        assert_eq!(Condition::parse(&condition.to_string()).unwrap(), condition);

        assert!(Condition::parse(r#"activityKind in ["hip, knee]"#).is_err());
    }

    #[test]
    fn test_matches_uses_facts() {
        let resource: ResourceId = ResourceId::new("ROOM-A");
        let subject: AssignmentFacts<'_> = facts(&resource, Some("Complex Surgery"));

        assert!(
            Condition::parse(r#"activityKind = "complex surgery""#)
                .unwrap()
                .matches(&subject)
        );
        assert!(Condition::parse("shiftPeriod in [NIGHT, GUARD_24H]").unwrap().matches(&subject));
        assert!(!Condition::parse("hours >= 8").unwrap().matches(&subject));
        assert!(Condition::parse("staffRole = INTERN").unwrap().matches(&subject));
        assert!(!Condition::parse("sectorId = URG").unwrap().matches(&subject));
        assert!(!Condition::parse("activityKind = x").unwrap().matches(&facts(&resource, None)));
    }

    #[test]
    fn test_definition_json_uses_condition_strings() {
        let json: &str = r#"{
            "id": "max-complex",
            "name": "Complex surgeries",
            "conditions": ["activityKind = \"complex surgery\""],
            "limit": 1
        }"#;

        let definition: CustomRuleDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(definition.rule_id(), "custom:max-complex");
        assert_eq!(definition.scope, RuleScope::PerStaffPerDay);
        assert_eq!(definition.severity, Severity::Warning);
        assert!(definition.enabled);

        let bad: &str = r#"{"id": "x", "name": "x", "conditions": ["1 + 1"], "limit": 1}"#;
        assert!(serde_json::from_str::<CustomRuleDefinition>(bad).is_err());
    }
}
