// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-rule engine configuration.
//!
//! Every field has a default so a configuration file only needs to list
//! what it changes. Severities are configuration: the same rule can be a
//! warning in one deployment and blocking in another.

use crate::error::CoreError;
use crate::rules::{
    CONSECUTIVE_DAYS, DOUBLE_BOOKING, GUARD_INTERVAL, LEAVE_CONFLICT, MINIMUM_STAFFING,
    QUALIFICATION, REST_TIME, SUPERVISION, WEEKLY_HOURS,
};
use bloc_planning_domain::Severity;
use serde::{Deserialize, Serialize};

/// Longest configurable rest after a night or guard: one week.
pub const MAX_REST_HOURS: f64 = 168.0;

/// Toggle and severity for rules without extra parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Severity of the violations it raises.
    pub severity: Severity,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Blocking,
        }
    }
}

/// Supervision rule settings. Non-blocking unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisionConfig {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Severity of an unsupervised intern.
    pub severity: Severity,
}

impl Default for SupervisionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Warning,
        }
    }
}

/// Rest-time rule settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestTimeConfig {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Severity of an insufficient rest gap.
    pub severity: Severity,
    /// Minimum hours between the end of a night or guard and the next start.
    pub minimum_rest_hours: f64,
}

impl RestTimeConfig {
    /// Days on each side of a date that can hold a slot closer than the
    /// minimum rest. The longest periods end 24h after their date.
    #[must_use]
    pub fn scan_days(&self) -> u32 {
        let hours: f64 = self.minimum_rest_hours.clamp(0.0, MAX_REST_HOURS);
        let mut days: u32 = 1;
        while f64::from(days) * 24.0 < hours + 24.0 {
            days += 1;
        }
        days
    }
}

impl Default for RestTimeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Blocking,
            minimum_rest_hours: 11.0,
        }
    }
}

/// Weekly-hour rule settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyHoursConfig {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Severity when the budget is exceeded.
    pub severity: Severity,
    /// Severity when the hard ceiling is exceeded.
    pub ceiling_severity: Severity,
    /// Budget for staff without their own.
    pub default_budget_hours: u32,
    /// Hours past which the ceiling severity applies.
    pub hard_ceiling_hours: u32,
}

impl Default for WeeklyHoursConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Warning,
            ceiling_severity: Severity::Blocking,
            default_budget_hours: 48,
            hard_ceiling_hours: 60,
        }
    }
}

/// Guard spacing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardIntervalConfig {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Severity of guards too close together or too many in a month.
    pub severity: Severity,
    /// Guards of one staff member must be at least this many days apart.
    pub min_days_between_guards: u32,
    /// Most guards one staff member may hold in a calendar month.
    pub max_guards_per_month: u32,
}

impl Default for GuardIntervalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Blocking,
            min_days_between_guards: 7,
            max_guards_per_month: 4,
        }
    }
}

/// Consecutive working days settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsecutiveDaysConfig {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Severity of a run that is too long.
    pub severity: Severity,
    /// Longest allowed run of dates with at least one assignment.
    pub max_consecutive_days: u32,
}

impl Default for ConsecutiveDaysConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Warning,
            max_consecutive_days: 6,
        }
    }
}

/// Minimum-staffing rule settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimumStaffingConfig {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Severity of a removal leaving the sector understaffed.
    pub severity: Severity,
    /// Severity used instead when the removal carries an admin override.
    pub override_severity: Severity,
}

impl Default for MinimumStaffingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Blocking,
            override_severity: Severity::Warning,
        }
    }
}

/// Settings for custom rules supplied by the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomRulesConfig {
    /// Whether custom rules run at all.
    pub enabled: bool,
}

impl Default for CustomRulesConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Bounds on the alternative search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Days searched on each side of the original date.
    pub search_radius_days: u32,
    /// Maximum suggestions returned (and offered inline by rules).
    pub max_suggestions: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            search_radius_days: 7,
            max_suggestions: 5,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Double-booking rule.
    pub double_booking: RuleConfig,
    /// Leave-conflict rule.
    pub leave_conflict: RuleConfig,
    /// Qualification rule.
    pub qualification: RuleConfig,
    /// Rest-time rule.
    pub rest_time: RestTimeConfig,
    /// Supervision rule.
    pub supervision: SupervisionConfig,
    /// Weekly-hour rule.
    pub weekly_hours: WeeklyHoursConfig,
    /// Guard spacing rule.
    pub guard_interval: GuardIntervalConfig,
    /// Consecutive working days rule.
    pub consecutive_days: ConsecutiveDaysConfig,
    /// Minimum-staffing rule.
    pub minimum_staffing: MinimumStaffingConfig,
    /// Custom rules.
    pub custom_rules: CustomRulesConfig,
    /// Alternative resolver.
    pub resolver: ResolverConfig,
}

impl EngineConfig {
    /// Checks values that the type alone cannot bound.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfig` if the minimum rest is not a
    /// number between 0 and [`MAX_REST_HOURS`], or if the consecutive day
    /// limit is zero.
    pub fn validate(&self) -> Result<(), CoreError> {
        let rest: f64 = self.rest_time.minimum_rest_hours;
        if !(0.0..=MAX_REST_HOURS).contains(&rest) {
            return Err(CoreError::InvalidConfig {
                field: "rest_time.minimum_rest_hours",
                reason: format!("{rest} is not between 0 and {MAX_REST_HOURS} hours"),
            });
        }
        if self.consecutive_days.max_consecutive_days == 0 {
            return Err(CoreError::InvalidConfig {
                field: "consecutive_days.max_consecutive_days",
                reason: String::from("must allow at least one day"),
            });
        }
        Ok(())
    }

    /// Days of plan around a proposal date that the built-in rules read.
    #[must_use]
    pub fn lookaround_days(&self) -> u32 {
        self.rest_time
            .scan_days()
            .max(self.guard_interval.min_days_between_guards)
            .max(self.consecutive_days.max_consecutive_days)
    }

    /// Whether the configuration lets the rule with `rule_id` run.
    ///
    /// Unknown ids (rules registered by callers) are always enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        match rule_id {
            DOUBLE_BOOKING => self.double_booking.enabled,
            LEAVE_CONFLICT => self.leave_conflict.enabled,
            QUALIFICATION => self.qualification.enabled,
            REST_TIME => self.rest_time.enabled,
            SUPERVISION => self.supervision.enabled,
            WEEKLY_HOURS => self.weekly_hours.enabled,
            GUARD_INTERVAL => self.guard_interval.enabled,
            CONSECUTIVE_DAYS => self.consecutive_days.enabled,
            MINIMUM_STAFFING => self.minimum_staffing.enabled,
            id if id.starts_with("custom:") => self.custom_rules.enabled,
            _ => true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let json: &str = r#"{
            "supervision": { "severity": "BLOCKING" },
            "weekly_hours": { "hard_ceiling_hours": 52 }
        }"#;

        let config: EngineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.supervision.severity, Severity::Blocking);
        assert!(config.supervision.enabled);
        assert_eq!(config.weekly_hours.hard_ceiling_hours, 52);
        assert_eq!(config.weekly_hours.default_budget_hours, 48);
        assert_eq!(config.rest_time.minimum_rest_hours, 11.0);
        assert_eq!(config.resolver.max_suggestions, 5);
    }

    #[test]
    fn test_rest_minimum_is_bounded() {
        let mut config: EngineConfig = EngineConfig::default();
        assert!(config.validate().is_ok());

        for hours in [-1.0, 1e18, f64::NAN, f64::INFINITY] {
            config.rest_time.minimum_rest_hours = hours;
            assert!(
                matches!(
                    config.validate(),
                    Err(CoreError::InvalidConfig {
                        field: "rest_time.minimum_rest_hours",
                        ..
                    })
                ),
                "accepted {hours}"
            );
        }
    }

    #[test]
    fn test_rest_scan_covers_minimum() {
        let mut rest: RestTimeConfig = RestTimeConfig::default();
        assert_eq!(rest.scan_days(), 2);

        rest.minimum_rest_hours = 72.0;
        assert_eq!(rest.scan_days(), 4);

        rest.minimum_rest_hours = MAX_REST_HOURS;
        assert_eq!(rest.scan_days(), 8);
    }

    #[test]
    fn test_consecutive_limit_must_allow_a_day() {
        let mut config: EngineConfig = EngineConfig::default();
        config.consecutive_days.max_consecutive_days = 0;

        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfig {
                field: "consecutive_days.max_consecutive_days",
                ..
            })
        ));
    }

    #[test]
    fn test_lookaround_covers_every_rule() {
        let mut config: EngineConfig = EngineConfig::default();
        assert_eq!(config.lookaround_days(), 7);

        config.guard_interval.min_days_between_guards = 14;
        assert_eq!(config.lookaround_days(), 14);

        config.rest_time.minimum_rest_hours = MAX_REST_HOURS;
        config.guard_interval.min_days_between_guards = 1;
        assert_eq!(config.lookaround_days(), 8);
    }

    #[test]
    fn test_rule_enabled_lookup() {
        let mut config: EngineConfig = EngineConfig::default();
        config.rest_time.enabled = false;
        config.custom_rules.enabled = false;
        config.guard_interval.enabled = false;

        assert!(!config.is_rule_enabled(REST_TIME));
        assert!(!config.is_rule_enabled(GUARD_INTERVAL));
        assert!(config.is_rule_enabled(CONSECUTIVE_DAYS));
        assert!(!config.is_rule_enabled("custom:max-complex"));
        assert!(config.is_rule_enabled(SUPERVISION));
        assert!(config.is_rule_enabled("site-specific"));
    }
}
