//! Configuration types for daily payroll.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a payroll data directory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AllowedRole, Employee, Shift};

/// Overtime and night-rule parameters.
///
/// Every field has a default, so `rules.yaml` only needs the values it
/// changes.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
///
/// let rules = PayrollRules::default();
/// assert_eq!(rules.standard_threshold_hours, Decimal::new(8, 0));
/// assert_eq!(rules.night_threshold_hours, Decimal::new(7, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollRules {
    /// Hours at 100% on a day without the night rule.
    pub standard_threshold_hours: Decimal,
    /// Hours at 100% once the night rule applies.
    pub night_threshold_hours: Decimal,
    /// Night-window hours that switch the night rule on.
    pub night_rule_min_hours: Decimal,
    /// Length of the first overtime tier.
    pub first_tier_span_hours: Decimal,
    /// Rate multiplier for the first overtime tier.
    pub first_tier_multiplier: Decimal,
    /// Rate multiplier for everything beyond the first tier.
    pub second_tier_multiplier: Decimal,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            standard_threshold_hours: Decimal::new(8, 0),
            night_threshold_hours: Decimal::new(7, 0),
            night_rule_min_hours: Decimal::new(2, 0),
            first_tier_span_hours: Decimal::new(2, 0),
            first_tier_multiplier: Decimal::new(125, 2),
            second_tier_multiplier: Decimal::new(150, 2),
        }
    }
}

impl PayrollRules {
    /// Checks that every threshold and multiplier is positive.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("standard_threshold_hours", self.standard_threshold_hours),
            ("night_threshold_hours", self.night_threshold_hours),
            ("night_rule_min_hours", self.night_rule_min_hours),
            ("first_tier_span_hours", self.first_tier_span_hours),
            ("first_tier_multiplier", self.first_tier_multiplier),
            ("second_tier_multiplier", self.second_tier_multiplier),
        ];

        match fields.iter().find(|(_, value)| *value <= Decimal::ZERO) {
            Some((name, value)) => Err(format!("{} must be positive, got {}", name, value)),
            None => Ok(()),
        }
    }
}

/// Contents of `employees.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesFile {
    /// Employee records.
    pub employees: Vec<Employee>,
}

/// Contents of `allowed_roles.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AllowedRolesFile {
    /// Allowed subsidiary/role rows with rates.
    pub allowed_roles: Vec<AllowedRole>,
}

/// Contents of `shifts.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftsFile {
    /// Raw shift records.
    #[serde(default)]
    pub shifts: Vec<Shift>,
}
