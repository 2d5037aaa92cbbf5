// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::rules::{
    ConsecutiveDaysRule, DoubleBookingRule, GuardIntervalRule, LeaveConflictRule,
    MinimumStaffingRule, QualificationRule, RestTimeRule, Rule, RuleCategory, SupervisionRule,
    WeeklyHoursRule,
};
use std::collections::BTreeSet;

/// An ordered, configurable collection of rules.
///
/// Rules iterate by category, then in registration order within a
/// category, so identical inputs always yield identically ordered
/// violations.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
    disabled: BTreeSet<String>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rules.
    #[must_use]
    pub fn standard() -> Self {
        let mut rule_set: Self = Self::new();
        rule_set.register(Box::new(DoubleBookingRule));
        rule_set.register(Box::new(LeaveConflictRule));
        rule_set.register(Box::new(QualificationRule));
        rule_set.register(Box::new(RestTimeRule));
        rule_set.register(Box::new(SupervisionRule));
        rule_set.register(Box::new(WeeklyHoursRule));
        rule_set.register(Box::new(GuardIntervalRule));
        rule_set.register(Box::new(ConsecutiveDaysRule));
        rule_set.register(Box::new(MinimumStaffingRule));
        rule_set
    }

    /// Adds a rule after every registered rule of the same or an earlier
    /// category.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let category: RuleCategory = rule.category();
        let position: usize = self
            .rules
            .iter()
            .position(|existing| existing.category() > category)
            .unwrap_or(self.rules.len());
        self.rules.insert(position, rule);
    }

    /// Disables a rule by id. Also applies to custom rules loaded later.
    ///
    /// # Returns
    ///
    /// `true` if the id was not already disabled.
    pub fn disable(&mut self, rule_id: &str) -> bool {
        self.disabled.insert(rule_id.to_string())
    }

    /// Re-enables a disabled rule.
    pub fn enable(&mut self, rule_id: &str) -> bool {
        self.disabled.remove(rule_id)
    }

    /// Whether `rule_id` has been disabled.
    #[must_use]
    pub fn is_disabled(&self, rule_id: &str) -> bool {
        self.disabled.contains(rule_id)
    }

    /// Ids of every registered rule, in evaluation order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Enabled rules, in evaluation order.
    pub fn enabled(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules
            .iter()
            .map(|rule| rule.as_ref())
            .filter(|rule| !self.is_disabled(rule.id()))
    }

    /// Number of registered rules, disabled ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.ids())
            .field("disabled", &self.disabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::CustomRuleDefinition;
    use crate::rules::{CustomRule, EvaluationContext};
    use bloc_planning_domain::Violation;

    struct SiteRule;

    impl Rule for SiteRule {
        fn id(&self) -> &str {
            "site-specific"
        }

        fn category(&self) -> RuleCategory {
            RuleCategory::Skill
        }

        fn evaluate(&self, _ctx: &EvaluationContext<'_>) -> Vec<Violation> {
            Vec::new()
        }
    }

    #[test]
    fn test_standard_order_follows_categories() {
        let rule_set: RuleSet = RuleSet::standard();

        assert_eq!(
            rule_set.ids(),
            vec![
                "double-booking",
                "leave-conflict",
                "qualification",
                "rest-time",
                "supervision",
                "weekly-hours",
                "guard-interval",
                "consecutive-days",
                "minimum-staffing",
            ]
        );
    }

    #[test]
    fn test_register_inserts_within_category() {
        let mut rule_set: RuleSet = RuleSet::standard();
        rule_set.register(Box::new(CustomRule::new(CustomRuleDefinition::new(
            "limit", "Limit", Vec::new(), 1,
        ))));
        rule_set.register(Box::new(SiteRule));

        let ids: Vec<&str> = rule_set.ids();

        assert_eq!(ids[2], "qualification");
        assert_eq!(ids[3], "site-specific");
        assert_eq!(ids[4], "rest-time");
        assert_eq!(ids.last(), Some(&"custom:limit"));
    }

    #[test]
    fn test_disable_skips_rule() {
        let mut rule_set: RuleSet = RuleSet::standard();

        assert!(rule_set.disable("supervision"));
        assert!(!rule_set.disable("supervision"));

        let ids: Vec<&str> = rule_set.enabled().map(Rule::id).collect();
        assert!(!ids.contains(&"supervision"));
        assert_eq!(ids.len(), rule_set.len() - 1);

        assert!(rule_set.enable("supervision"));
        assert_eq!(rule_set.enabled().count(), rule_set.len());
    }
}
