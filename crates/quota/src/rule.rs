// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::QuotaError;
use bloc_planning_domain::LeaveType;
use serde::{Deserialize, Serialize};

/// Converts days of one leave type into another.
///
/// Rules read from JSON are checked like rules added in code: a rate or a
/// cap that is not a positive finite number is refused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TransferRuleFields")]
pub struct TransferRule {
    /// The rule identifier.
    pub id: String,
    /// Debited leave type.
    pub source_type: LeaveType,
    /// Credited leave type.
    pub destination_type: LeaveType,
    /// Days credited per day debited.
    pub conversion_rate: f64,
    /// Whether a transfer waits for approval before balances move.
    #[serde(default)]
    pub requires_approval: bool,
    /// Disabled rules never match.
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
    /// Upper bound on the credited amount of one transfer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_days_credited: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferRuleFields {
    id: String,
    source_type: LeaveType,
    destination_type: LeaveType,
    conversion_rate: f64,
    #[serde(default)]
    requires_approval: bool,
    #[serde(default = "default_enabled")]
    is_enabled: bool,
    #[serde(default)]
    max_days_credited: Option<f64>,
}

impl TryFrom<TransferRuleFields> for TransferRule {
    type Error = QuotaError;

    fn try_from(fields: TransferRuleFields) -> Result<Self, Self::Error> {
        let rule: Self = Self {
            id: fields.id,
            source_type: fields.source_type,
            destination_type: fields.destination_type,
            conversion_rate: fields.conversion_rate,
            requires_approval: fields.requires_approval,
            is_enabled: fields.is_enabled,
            max_days_credited: fields.max_days_credited,
        };
        rule.check()?;
        Ok(rule)
    }
}

const fn default_enabled() -> bool {
    true
}

impl TransferRule {
    /// Creates an enabled rule that applies immediately.
    #[must_use]
    pub fn new(
        id: &str,
        source_type: LeaveType,
        destination_type: LeaveType,
        conversion_rate: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            source_type,
            destination_type,
            conversion_rate,
            requires_approval: false,
            is_enabled: true,
            max_days_credited: None,
        }
    }

    /// Checks that the rate and the cap are positive finite numbers.
    ///
    /// # Errors
    ///
    /// Returns `QuotaError::InvalidRule` naming the offending value.
    pub fn check(&self) -> Result<(), QuotaError> {
        let invalid = |reason: String| QuotaError::InvalidRule {
            rule_id: self.id.clone(),
            reason,
        };

        if !(self.conversion_rate.is_finite() && self.conversion_rate > 0.0) {
            return Err(invalid(format!(
                "conversion rate must be a positive number, got {}",
                self.conversion_rate
            )));
        }
        if let Some(cap) = self
            .max_days_credited
            .filter(|cap| !(cap.is_finite() && *cap > 0.0))
        {
            return Err(invalid(format!(
                "credit cap must be a positive number of days, got {cap}"
            )));
        }
        Ok(())
    }

    /// Whether the rule converts `source` into `destination`.
    #[must_use]
    pub fn applies_to(&self, source: LeaveType, destination: LeaveType) -> bool {
        self.is_enabled && self.source_type == source && self.destination_type == destination
    }

    /// Days credited for `days_debited`, after the cap.
    #[must_use]
    pub fn credited_for(&self, days_debited: f64) -> f64 {
        let credited: f64 = days_debited * self.conversion_rate;
        self.max_days_credited
            .map_or(credited, |cap| credited.min(cap))
    }
}

/// How unused days roll into the next period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarryOverKind {
    /// `value` percent of the remaining days, rounded down.
    Percentage,
    /// Exactly `value` days, bounded by what remains.
    Fixed,
    /// At most `value` days.
    MaxDays,
    /// Everything that remains.
    All,
}

/// A carry-over policy for one leave type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarryOverRule {
    /// The leave type the rule applies to.
    pub leave_type: LeaveType,
    /// The computation.
    pub kind: CarryOverKind,
    /// Percentage or day count, depending on `kind`.
    #[serde(default)]
    pub value: f64,
}

impl CarryOverRule {
    /// Days carried over from `remaining`.
    #[must_use]
    pub fn carried_from(&self, remaining: f64) -> f64 {
        if remaining <= 0.0 {
            return 0.0;
        }
        match self.kind {
            CarryOverKind::Percentage => (remaining * self.value / 100.0).floor(),
            CarryOverKind::Fixed | CarryOverKind::MaxDays => remaining.min(self.value.max(0.0)),
            CarryOverKind::All => remaining,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_applies_rate_then_cap() {
        let mut rule: TransferRule =
            TransferRule::new("r-1", LeaveType::Recovery, LeaveType::Annual, 0.5);
        assert_eq!(rule.credited_for(5.0), 2.5);

        rule.max_days_credited = Some(2.0);
        assert_eq!(rule.credited_for(5.0), 2.0);
        assert_eq!(rule.credited_for(1.0), 0.5);
    }

    #[test]
    fn test_rate_and_cap_must_be_positive() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let rule: TransferRule =
                TransferRule::new("r-1", LeaveType::Annual, LeaveType::Recovery, rate);
            assert!(
                matches!(rule.check(), Err(QuotaError::InvalidRule { .. })),
                "accepted rate {rate}"
            );
        }

        let mut capped: TransferRule =
            TransferRule::new("r-1", LeaveType::Annual, LeaveType::Recovery, 1.0);
        assert!(capped.check().is_ok());
        capped.max_days_credited = Some(-2.0);
        assert_eq!(capped.check().unwrap_err().code(), "InvalidRule");
    }

    #[test]
    fn test_rule_json_is_checked_on_read() {
        let json = |rate: &str| {
            format!(
                r#"{{"id": "r-1", "sourceType": "ANNUAL", "destinationType": "RECOVERY", "conversionRate": {rate}}}"#
            )
        };

        let rule: TransferRule = serde_json::from_str(&json("0.5")).unwrap();
        assert_eq!(rule.conversion_rate, 0.5);
        assert!(rule.is_enabled);

        let err: serde_json::Error = serde_json::from_str::<TransferRule>(&json("0")).unwrap_err();
        assert!(err.to_string().contains("conversion rate"));
        assert!(serde_json::from_str::<TransferRule>(&json("-0.5")).is_err());
    }

    #[test]
    fn test_disabled_rule_never_applies() {
        let mut rule: TransferRule =
            TransferRule::new("r-1", LeaveType::Annual, LeaveType::Recovery, 1.0);
        assert!(rule.applies_to(LeaveType::Annual, LeaveType::Recovery));
        assert!(!rule.applies_to(LeaveType::Recovery, LeaveType::Annual));

        rule.is_enabled = false;
        assert!(!rule.applies_to(LeaveType::Annual, LeaveType::Recovery));
    }

    #[test]
    fn test_carry_over_kinds() {
        let rule = |kind: CarryOverKind, value: f64| CarryOverRule {
            leave_type: LeaveType::Annual,
            kind,
            value,
        };

        assert_eq!(rule(CarryOverKind::Percentage, 50.0).carried_from(7.0), 3.0);
        assert_eq!(rule(CarryOverKind::Fixed, 5.0).carried_from(7.0), 5.0);
        assert_eq!(rule(CarryOverKind::Fixed, 10.0).carried_from(7.0), 7.0);
        assert_eq!(rule(CarryOverKind::MaxDays, 3.0).carried_from(7.0), 3.0);
        assert_eq!(rule(CarryOverKind::All, 0.0).carried_from(7.5), 7.5);
        assert_eq!(rule(CarryOverKind::All, 0.0).carried_from(-1.0), 0.0);
    }
}
