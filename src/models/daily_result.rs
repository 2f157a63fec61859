//! Daily payroll result models.
//!
//! This module contains the [`DailyPayrollResult`] type and its associated
//! structures: per-shift details and the audit trace explaining how the
//! numbers were reached.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The calculated breakdown of one shift within the day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ShiftDetail;
/// use rust_decimal::Decimal;
///
/// let detail = ShiftDetail {
///     shift_id: "1".to_string(),
///     subsidiary: "Alpha Logistics".to_string(),
///     role: "Driver".to_string(),
///     start_time: "23:00".to_string(),
///     end_time: "03:00".to_string(),
///     hours: Decimal::new(4, 0),
///     night_hours: Decimal::new(4, 0),
///     hourly_rate: Some(Decimal::new(5200, 2)),
///     cross_midnight: true,
/// };
/// assert!(detail.cross_midnight);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDetail {
    /// The ID of the shift.
    pub shift_id: String,
    /// The subsidiary the shift was worked for.
    pub subsidiary: String,
    /// The role performed.
    pub role: String,
    /// Clock-in time as recorded.
    pub start_time: String,
    /// Clock-out time as recorded.
    pub end_time: String,
    /// Duration of the shift in hours.
    pub hours: Decimal,
    /// Hours of the shift inside the 22:00-06:00 window.
    pub night_hours: Decimal,
    /// Configured rate for the shift's subsidiary/role, if any.
    pub hourly_rate: Option<Decimal>,
    /// Whether the shift runs past midnight.
    pub cross_midnight: bool,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete payroll result for one employee on one date.
///
/// Hour fields are rounded to 4 decimal places and the salary to 2. The
/// result holds no timestamps or generated ids, so the same inputs always
/// produce the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPayrollResult {
    /// The ID of the employee.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The date calculated.
    pub date: NaiveDate,
    /// The employee's contractual standard day.
    pub daily_standard: Decimal,
    /// Per-shift details, sorted by start time.
    pub shifts: Vec<ShiftDetail>,
    /// Sum of all shift durations.
    pub total_hours: Decimal,
    /// Sum of all hours inside the night window.
    pub night_hours_in_window: Decimal,
    /// Whether the reduced night threshold applied.
    pub night_rule_active: bool,
    /// Hours paid at 100% before overtime starts.
    pub overtime_threshold: Decimal,
    /// Hours paid at 100%.
    pub hours_100: Decimal,
    /// Hours paid at 125%.
    pub hours_125: Decimal,
    /// Hours paid at 150%.
    pub hours_150: Decimal,
    /// The highest rate among the subsidiary/role pairs worked.
    pub max_rate: Decimal,
    /// Simulated salary for the day.
    pub salary_simulation: Decimal,
    /// Hours short of the daily standard (never negative).
    pub daily_deficit: Decimal,
    /// Hours worked per subsidiary.
    pub hours_by_subsidiary: BTreeMap<String, Decimal>,
    /// Hours worked per role.
    pub hours_by_role: BTreeMap<String, Decimal>,
    /// How the result was derived.
    pub audit_trace: AuditTrace,
}

impl DailyPayrollResult {
    /// Returns true if no shifts were recorded for the day.
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Total overtime hours across both overtime tiers.
    pub fn overtime_hours(&self) -> Decimal {
        self.hours_125 + self.hours_150
    }
}
