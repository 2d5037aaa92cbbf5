// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::metrics;
use crate::plan::PlanView;
use crate::proposal::Proposal;
use crate::rule_set::RuleSet;
use crate::rules::{CustomRule, EvaluationContext, Rule};
use crate::snapshot::Snapshot;
use bloc_planning_domain::{ValidationMetrics, ValidationResult, Violation};
use tracing::{debug, info};

/// Runs a rule set against proposals.
///
/// The engine holds no mutable state: one instance can serve concurrent
/// requests, each bringing its own snapshot.
#[derive(Debug)]
pub struct ValidationEngine {
    rule_set: RuleSet,
    config: EngineConfig,
}

impl ValidationEngine {
    /// Creates a new `ValidationEngine`.
    ///
    /// # Arguments
    ///
    /// * `rule_set` - The rules to run
    /// * `config` - Per-rule settings
    #[must_use]
    pub const fn new(rule_set: RuleSet, config: EngineConfig) -> Self {
        Self { rule_set, config }
    }

    /// An engine running the built-in rules.
    #[must_use]
    pub fn standard(config: EngineConfig) -> Self {
        Self::new(RuleSet::standard(), config)
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The rule set.
    #[must_use]
    pub const fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    /// Validates a proposal against a snapshot.
    ///
    /// Every enabled rule runs; nothing short-circuits. Business-rule
    /// failures are reported in the result, never as errors.
    ///
    /// # Arguments
    ///
    /// * `proposal` - The change to validate
    /// * `snapshot` - Reference data for the relevant window
    ///
    /// # Returns
    ///
    /// A `ValidationResult` whose `valid` flag is true iff no violation is
    /// blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if the proposal is structurally malformed or the
    /// configuration is out of range.
    pub fn validate(
        &self,
        proposal: &Proposal,
        snapshot: &Snapshot,
    ) -> Result<ValidationResult, CoreError> {
        self.config.validate()?;
        proposal.validate()?;
        let result: ValidationResult = self.evaluate(proposal, snapshot);

        info!(
            proposed = proposal.proposed().len(),
            removal = proposal.removed().is_some(),
            violations = result.violations.len(),
            valid = result.valid,
            "Validated proposal"
        );

        Ok(result)
    }

    /// Evaluates an already checked proposal.
    pub(crate) fn evaluate(&self, proposal: &Proposal, snapshot: &Snapshot) -> ValidationResult {
        let plan: PlanView = PlanView::build(snapshot, proposal);
        let ctx: EvaluationContext<'_> = EvaluationContext {
            proposal,
            snapshot,
            plan: &plan,
            config: &self.config,
        };

        let mut violations: Vec<Violation> = Vec::new();
        for rule in self.rule_set.enabled() {
            self.run_rule(rule, &ctx, &mut violations);
        }

        if self.config.custom_rules.enabled {
            for definition in snapshot.custom_rules.iter().filter(|d| d.enabled) {
                let rule: CustomRule = CustomRule::new(definition.clone());
                if !self.rule_set.is_disabled(rule.id()) {
                    self.run_rule(&rule, &ctx, &mut violations);
                }
            }
        }

        let metrics: ValidationMetrics = metrics::compute(&ctx);
        ValidationResult::new(violations, metrics)
    }

    fn run_rule(
        &self,
        rule: &dyn Rule,
        ctx: &EvaluationContext<'_>,
        violations: &mut Vec<Violation>,
    ) {
        if !self.config.is_rule_enabled(rule.id()) {
            debug!(rule_id = rule.id(), "Rule disabled by configuration");
            return;
        }
        let found: Vec<Violation> = rule.evaluate(ctx);
        debug!(
            rule_id = rule.id(),
            category = rule.category().as_str(),
            violations = found.len(),
            "Evaluated rule"
        );
        violations.extend(found);
    }
}
