//! Overtime threshold and pay-tier bucketing.
//!
//! The day's total hours are split into three tiers:
//! - up to the threshold at 100%
//! - the next two hours at 125%
//! - everything beyond at 150%
//!
//! The threshold is 8 hours, or 7 once the day has at least 2 hours inside
//! the night window. Both decisions are made once per day on the cross-shift
//! totals, never per shift.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollRules;
use crate::models::AuditStep;

/// Hours of a day split into pay tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourTiers {
    /// Hours paid at 100%.
    pub hours_100: Decimal,
    /// Hours paid at 125%.
    pub hours_125: Decimal,
    /// Hours paid at 150%.
    pub hours_150: Decimal,
}

impl HourTiers {
    /// Sum of all tiers; always equal to the hours that were split.
    pub fn total(&self) -> Decimal {
        self.hours_100 + self.hours_125 + self.hours_150
    }
}

/// The overtime threshold chosen for a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvertimeThreshold {
    /// Hours paid at 100% before overtime starts.
    pub threshold: Decimal,
    /// Whether the reduced night threshold was chosen.
    pub night_rule_active: bool,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// The result of splitting a day's hours into tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSplit {
    /// The tier hours.
    pub tiers: HourTiers,
    /// The audit step recording the split.
    pub audit_step: AuditStep,
}

/// Chooses the overtime threshold from the day's total night-window hours.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::determine_overtime_threshold;
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
///
/// let rules = PayrollRules::default();
///
/// let day = determine_overtime_threshold(Decimal::ZERO, &rules, 1);
/// assert_eq!(day.threshold, Decimal::new(8, 0));
///
/// let night = determine_overtime_threshold(Decimal::new(2, 0), &rules, 1);
/// assert_eq!(night.threshold, Decimal::new(7, 0));
/// assert!(night.night_rule_active);
/// ```
pub fn determine_overtime_threshold(
    night_hours: Decimal,
    rules: &PayrollRules,
    step_number: u32,
) -> OvertimeThreshold {
    let night_rule_active = night_hours >= rules.night_rule_min_hours;
    let threshold = if night_rule_active {
        rules.night_threshold_hours
    } else {
        rules.standard_threshold_hours
    };

    let reasoning = if night_rule_active {
        format!(
            "{} night-window hours reach the {} hour minimum, threshold reduced to {} hours",
            night_hours.normalize(),
            rules.night_rule_min_hours.normalize(),
            threshold.normalize()
        )
    } else {
        format!(
            "{} night-window hours are under the {} hour minimum, standard {} hour threshold applies",
            night_hours.normalize(),
            rules.night_rule_min_hours.normalize(),
            threshold.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_threshold".to_string(),
        rule_name: "Night Rule Overtime Threshold".to_string(),
        input: serde_json::json!({
            "night_hours": night_hours.normalize().to_string(),
            "night_rule_min_hours": rules.night_rule_min_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "threshold": threshold.normalize().to_string(),
            "night_rule_active": night_rule_active
        }),
        reasoning,
    };

    OvertimeThreshold {
        threshold,
        night_rule_active,
        audit_step,
    }
}

/// Splits total hours into the 100% / 125% / 150% tiers.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::split_into_tiers;
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
///
/// let rules = PayrollRules::default();
/// let split = split_into_tiers(Decimal::new(11, 0), Decimal::new(8, 0), &rules, 1);
///
/// assert_eq!(split.tiers.hours_100, Decimal::new(8, 0));
/// assert_eq!(split.tiers.hours_125, Decimal::new(2, 0));
/// assert_eq!(split.tiers.hours_150, Decimal::new(1, 0));
/// ```
pub fn split_into_tiers(
    total_hours: Decimal,
    threshold: Decimal,
    rules: &PayrollRules,
    step_number: u32,
) -> TierSplit {
    let span = rules.first_tier_span_hours;
    let excess = total_hours - threshold;

    let tiers = HourTiers {
        hours_100: total_hours.min(threshold),
        hours_125: excess.max(Decimal::ZERO).min(span),
        hours_150: (excess - span).max(Decimal::ZERO),
    };

    let reasoning = if excess > Decimal::ZERO {
        format!(
            "{} hours exceed the {} hour threshold by {}: {} at 100%, {} at 125%, {} at 150%",
            total_hours.normalize(),
            threshold.normalize(),
            excess.normalize(),
            tiers.hours_100.normalize(),
            tiers.hours_125.normalize(),
            tiers.hours_150.normalize()
        )
    } else {
        format!(
            "{} hours are within the {} hour threshold, no overtime",
            total_hours.normalize(),
            threshold.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "hour_tiers".to_string(),
        rule_name: "Overtime Tier Split".to_string(),
        input: serde_json::json!({
            "total_hours": total_hours.normalize().to_string(),
            "threshold": threshold.normalize().to_string(),
            "first_tier_span_hours": span.normalize().to_string()
        }),
        output: serde_json::json!({
            "hours_100": tiers.hours_100.normalize().to_string(),
            "hours_125": tiers.hours_125.normalize().to_string(),
            "hours_150": tiers.hours_150.normalize().to_string()
        }),
        reasoning,
    };

    TierSplit { tiers, audit_step }
}
