//! Cross-shift aggregation for one employee/date.
//!
//! Implements the split-shift rule: durations and night-window overlap are
//! summed across every shift of the day first, and only the totals are
//! bucketed into pay tiers. Everything is accumulated in whole minutes, so
//! the order of the shifts never changes the outcome.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::error::EngineResult;
use crate::models::{AuditStep, Shift};

use super::night_window::night_overlap_minutes;
use super::overtime_tiers::{HourTiers, determine_overtime_threshold, split_into_tiers};
use super::time_arithmetic::{crosses_midnight, minutes_to_hours, shift_duration_minutes};

/// One shift with its clock times resolved to minutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasuredShift {
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
    /// Clock-in as minutes since midnight.
    pub start_minute: u32,
    /// Duration in minutes.
    pub duration_minutes: u32,
    /// Minutes inside the night window.
    pub night_minutes: u32,
    /// Whether the shift runs past midnight.
    pub cross_midnight: bool,
}

impl MeasuredShift {
    /// The shift's span on the 48 hour minute axis.
    pub fn span(&self) -> (u32, u32) {
        (self.start_minute, self.start_minute + self.duration_minutes)
    }
}

/// Validates and measures a single shift.
pub fn measure_shift(shift: &Shift) -> EngineResult<MeasuredShift> {
    shift.validate()?;
    let (start, end) = shift.clock_minutes()?;

    Ok(MeasuredShift {
        shift_id: shift.id.clone(),
        subsidiary: shift.subsidiary.clone(),
        role: shift.role.clone(),
        start_time: shift.start_time.clone(),
        end_time: shift.end_time.clone(),
        start_minute: start,
        duration_minutes: shift_duration_minutes(start, end),
        night_minutes: night_overlap_minutes(start, end),
        cross_midnight: crosses_midnight(start, end),
    })
}

/// The aggregated figures for one employee/date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAggregate {
    /// Measured shifts sorted by start time.
    pub shifts: Vec<MeasuredShift>,
    /// Total worked minutes.
    pub total_minutes: u32,
    /// Total minutes inside the night window.
    pub night_minutes: u32,
    /// The overtime threshold in hours.
    pub threshold: Decimal,
    /// Whether the reduced night threshold applied.
    pub night_rule_active: bool,
    /// Total hours split into pay tiers.
    pub tiers: HourTiers,
    /// Hours short of the daily standard.
    pub deficit: Decimal,
    /// Worked minutes per subsidiary.
    pub minutes_by_subsidiary: BTreeMap<String, u32>,
    /// Worked minutes per role.
    pub minutes_by_role: BTreeMap<String, u32>,
    /// Audit steps for each measurement and decision.
    pub audit_steps: Vec<AuditStep>,
}

impl DailyAggregate {
    /// Total worked hours.
    pub fn total_hours(&self) -> Decimal {
        minutes_to_hours(self.total_minutes)
    }

    /// Total hours inside the night window.
    pub fn night_hours(&self) -> Decimal {
        minutes_to_hours(self.night_minutes)
    }
}

/// Returns the hours short of the daily standard, never negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::daily_deficit;
/// use rust_decimal::Decimal;
///
/// assert_eq!(daily_deficit(Decimal::new(8, 0), Decimal::new(55, 1)), Decimal::new(25, 1));
/// assert_eq!(daily_deficit(Decimal::new(8, 0), Decimal::new(10, 0)), Decimal::ZERO);
/// ```
pub fn daily_deficit(daily_standard: Decimal, total_hours: Decimal) -> Decimal {
    (daily_standard - total_hours).max(Decimal::ZERO)
}

/// Aggregates every shift of one employee/date.
///
/// # Arguments
///
/// * `shifts` - The day's shifts, in any order
/// * `daily_standard` - The employee's contractual standard day
/// * `rules` - Threshold and tier parameters
/// * `step_number_start` - The first step number for the audit trail
///
/// # Errors
///
/// Fails with `FormatError` for an unparseable time and `InvalidShift` for a
/// zero-duration shift.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_day;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::Shift;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let shift = |id: &str, start: &str, end: &str| Shift {
///     id: id.to_string(),
///     employee_id: "E001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     subsidiary: "Alpha Logistics".to_string(),
///     role: "Driver".to_string(),
///     start_time: start.to_string(),
///     end_time: end.to_string(),
/// };
/// let shifts = vec![shift("a", "06:00", "11:00"), shift("b", "13:00", "19:00")];
///
/// let day = aggregate_day(&shifts, Decimal::new(8, 0), &PayrollRules::default(), 1).unwrap();
/// assert_eq!(day.total_hours(), Decimal::new(11, 0));
/// assert_eq!(day.tiers.hours_150, Decimal::new(1, 0));
/// ```
pub fn aggregate_day<'a>(
    shifts: impl IntoIterator<Item = &'a Shift>,
    daily_standard: Decimal,
    rules: &PayrollRules,
    step_number_start: u32,
) -> EngineResult<DailyAggregate> {
    let mut measured = shifts
        .into_iter()
        .map(measure_shift)
        .collect::<EngineResult<Vec<_>>>()?;
    measured.sort_by(|a, b| {
        (a.start_minute, a.duration_minutes, &a.shift_id).cmp(&(
            b.start_minute,
            b.duration_minutes,
            &b.shift_id,
        ))
    });

    let mut audit_steps = Vec::new();
    let mut step_number = step_number_start;
    let mut total_minutes = 0;
    let mut night_minutes = 0;
    let mut minutes_by_subsidiary: BTreeMap<String, u32> = BTreeMap::new();
    let mut minutes_by_role: BTreeMap<String, u32> = BTreeMap::new();

    for shift in &measured {
        total_minutes += shift.duration_minutes;
        night_minutes += shift.night_minutes;
        *minutes_by_subsidiary
            .entry(shift.subsidiary.clone())
            .or_insert(0) += shift.duration_minutes;
        *minutes_by_role.entry(shift.role.clone()).or_insert(0) += shift.duration_minutes;

        let hours = minutes_to_hours(shift.duration_minutes);
        let night_hours = minutes_to_hours(shift.night_minutes);
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "shift_measurement".to_string(),
            rule_name: "Shift Duration and Night Window".to_string(),
            input: serde_json::json!({
                "shift_id": shift.shift_id,
                "start_time": shift.start_time,
                "end_time": shift.end_time
            }),
            output: serde_json::json!({
                "hours": hours.round_dp(4).normalize().to_string(),
                "night_hours": night_hours.round_dp(4).normalize().to_string(),
                "cross_midnight": shift.cross_midnight
            }),
            reasoning: if shift.cross_midnight {
                format!(
                    "{}-{} crosses midnight: {} hours, {} inside 22:00-06:00",
                    shift.start_time,
                    shift.end_time,
                    hours.round_dp(4).normalize(),
                    night_hours.round_dp(4).normalize()
                )
            } else {
                format!(
                    "{}-{}: {} hours, {} inside 22:00-06:00",
                    shift.start_time,
                    shift.end_time,
                    hours.round_dp(4).normalize(),
                    night_hours.round_dp(4).normalize()
                )
            },
        });
        step_number += 1;
    }

    let total_hours = minutes_to_hours(total_minutes);
    let night_hours = minutes_to_hours(night_minutes);

    let threshold = determine_overtime_threshold(night_hours, rules, step_number);
    audit_steps.push(threshold.audit_step);
    step_number += 1;

    let split = split_into_tiers(total_hours, threshold.threshold, rules, step_number);
    audit_steps.push(split.audit_step);

    Ok(DailyAggregate {
        shifts: measured,
        total_minutes,
        night_minutes,
        threshold: threshold.threshold,
        night_rule_active: threshold.night_rule_active,
        tiers: split.tiers,
        deficit: daily_deficit(daily_standard, total_hours),
        minutes_by_subsidiary,
        minutes_by_role,
        audit_steps,
    })
}
