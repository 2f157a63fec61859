//! Daily payroll calculation for one employee/date.
//!
//! Ties the pipeline together: shifts are aggregated, the day's hours are
//! split into tiers, the highest applicable rate is selected and the salary
//! is simulated. Rounding happens here and nowhere earlier.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::PayrollRules;
use crate::error::EngineResult;
use crate::models::{
    AllowedRole, AuditStep, AuditTrace, AuditWarning, DailyPayrollResult, Employee, Shift,
    ShiftDetail,
};

use super::daily_aggregation::aggregate_day;
use super::overtime_tiers::HourTiers;
use super::rate_selection::select_max_rate;
use super::shift_validation::overlapping_pairs;
use super::time_arithmetic::minutes_to_hours;

/// Decimal places kept on hour figures.
pub const HOURS_DECIMAL_PLACES: u32 = 4;

/// Decimal places kept on money figures.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// The result of simulating a day's salary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalarySimulation {
    /// The unrounded salary.
    pub amount: Decimal,
    /// The audit step recording the computation.
    pub audit_step: AuditStep,
}

/// Rounds an hour figure to 4 decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_hours;
/// use rust_decimal::Decimal;
///
/// // 20 minutes
/// let third = Decimal::from(20) / Decimal::from(60);
/// assert_eq!(round_hours(third), Decimal::new(3333, 4));
/// ```
pub fn round_hours(hours: Decimal) -> Decimal {
    hours
        .round_dp_with_strategy(HOURS_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Rounds an amount of money to 2 decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(1234565, 4)).to_string(), "123.46");
/// assert_eq!(round_money(Decimal::new(416, 0)).to_string(), "416.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}

/// Prices the day's tiers at a single hourly rate.
///
/// `salary = h100 * rate + h125 * rate * 1.25 + h150 * rate * 1.5`
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{HourTiers, simulate_salary};
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
///
/// let tiers = HourTiers {
///     hours_100: Decimal::new(8, 0),
///     hours_125: Decimal::new(2, 0),
///     hours_150: Decimal::ZERO,
/// };
/// let salary = simulate_salary(&tiers, Decimal::new(52, 0), &PayrollRules::default(), 1);
/// assert_eq!(salary.amount, Decimal::new(546, 0));
/// ```
pub fn simulate_salary(
    tiers: &HourTiers,
    rate: Decimal,
    rules: &PayrollRules,
    step_number: u32,
) -> SalarySimulation {
    let ordinary = tiers.hours_100 * rate;
    let first_tier = tiers.hours_125 * rate * rules.first_tier_multiplier;
    let second_tier = tiers.hours_150 * rate * rules.second_tier_multiplier;
    let amount = ordinary + first_tier + second_tier;

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_simulation".to_string(),
        rule_name: "Salary Simulation".to_string(),
        input: serde_json::json!({
            "hours_100": round_hours(tiers.hours_100).to_string(),
            "hours_125": round_hours(tiers.hours_125).to_string(),
            "hours_150": round_hours(tiers.hours_150).to_string(),
            "rate": rate.to_string(),
            "first_tier_multiplier": rules.first_tier_multiplier.to_string(),
            "second_tier_multiplier": rules.second_tier_multiplier.to_string()
        }),
        output: serde_json::json!({
            "salary": round_money(amount).to_string()
        }),
        reasoning: format!(
            "{} x ${} + {} x ${} x {} + {} x ${} x {} = ${}",
            round_hours(tiers.hours_100),
            rate,
            round_hours(tiers.hours_125),
            rate,
            rules.first_tier_multiplier,
            round_hours(tiers.hours_150),
            rate,
            rules.second_tier_multiplier,
            round_money(amount)
        ),
    };

    SalarySimulation { amount, audit_step }
}

/// Calculates the daily payroll with the default rules.
///
/// Only shifts of `employee` booked on `date` are considered; any other
/// rows in `shifts` are ignored, as are allowed roles of other employees.
///
/// # Errors
///
/// Fails with `InvalidEmployee` for a non-positive daily standard,
/// `FormatError` for an unparseable shift time and `InvalidShift` for a
/// zero-duration shift.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_daily;
/// use payroll_engine::models::{AllowedRole, Employee, Shift};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// let employee = Employee::new("E001", "Dana Levi");
/// let roles = vec![AllowedRole {
///     employee_id: "E001".to_string(),
///     subsidiary: "Alpha Logistics".to_string(),
///     role: "Guard".to_string(),
///     hourly_rate: Decimal::new(40, 0),
/// }];
/// let shifts = vec![Shift {
///     id: "1".to_string(),
///     employee_id: "E001".to_string(),
///     date,
///     subsidiary: "Alpha Logistics".to_string(),
///     role: "Guard".to_string(),
///     start_time: "20:00".to_string(),
///     end_time: "06:00".to_string(),
/// }];
///
/// let result = compute_daily(&employee, date, &roles, &shifts).unwrap();
/// assert_eq!(result.overtime_threshold, Decimal::new(7, 0));
/// assert_eq!(result.hours_150, Decimal::new(1, 0));
/// // 7 x 40 + 2 x 40 x 1.25 + 1 x 40 x 1.5
/// assert_eq!(result.salary_simulation, Decimal::new(44000, 2));
/// ```
pub fn compute_daily(
    employee: &Employee,
    date: NaiveDate,
    allowed_roles: &[AllowedRole],
    shifts: &[Shift],
) -> EngineResult<DailyPayrollResult> {
    compute_daily_with_rules(employee, date, allowed_roles, shifts, &PayrollRules::default())
}

/// Calculates the daily payroll with explicit threshold and tier rules.
pub fn compute_daily_with_rules(
    employee: &Employee,
    date: NaiveDate,
    allowed_roles: &[AllowedRole],
    shifts: &[Shift],
    rules: &PayrollRules,
) -> EngineResult<DailyPayrollResult> {
    employee.validate()?;

    let day_shifts = shifts
        .iter()
        .filter(|s| s.employee_id == employee.id && s.date == date);
    let aggregate = aggregate_day(day_shifts, employee.daily_standard, rules, 1)?;

    let mut steps = aggregate.audit_steps.clone();
    let mut step_number = steps.len() as u32 + 1;

    let selection = select_max_rate(&employee.id, &aggregate.shifts, allowed_roles, step_number);
    steps.push(selection.audit_step.clone());
    step_number += 1;

    let salary = simulate_salary(&aggregate.tiers, selection.max_rate, rules, step_number);
    steps.push(salary.audit_step);

    let mut warnings = Vec::new();
    let mut shift_details = Vec::with_capacity(aggregate.shifts.len());
    for shift in &aggregate.shifts {
        let hourly_rate = selection
            .rates_used
            .get(&(shift.subsidiary.clone(), shift.role.clone()))
            .copied();
        if hourly_rate.is_none() {
            warnings.push(AuditWarning {
                code: "UNRATED_SHIFT".to_string(),
                message: format!(
                    "Shift {} ({} / {}) has no configured rate; its hours are paid at the day's max rate of ${}",
                    shift.shift_id, shift.subsidiary, shift.role, selection.max_rate
                ),
                severity: "medium".to_string(),
            });
        }

        shift_details.push(ShiftDetail {
            shift_id: shift.shift_id.clone(),
            subsidiary: shift.subsidiary.clone(),
            role: shift.role.clone(),
            start_time: shift.start_time.clone(),
            end_time: shift.end_time.clone(),
            hours: round_hours(minutes_to_hours(shift.duration_minutes)),
            night_hours: round_hours(minutes_to_hours(shift.night_minutes)),
            hourly_rate,
            cross_midnight: shift.cross_midnight,
        });
    }

    for (first, second) in overlapping_pairs(&aggregate.shifts) {
        warnings.push(AuditWarning {
            code: "OVERLAPPING_SHIFTS".to_string(),
            message: format!(
                "Shifts {} and {} overlap; both durations are counted",
                first, second
            ),
            severity: "low".to_string(),
        });
    }

    let hours_by_subsidiary = aggregate
        .minutes_by_subsidiary
        .iter()
        .map(|(name, minutes)| (name.clone(), round_hours(minutes_to_hours(*minutes))))
        .collect();
    let hours_by_role = aggregate
        .minutes_by_role
        .iter()
        .map(|(name, minutes)| (name.clone(), round_hours(minutes_to_hours(*minutes))))
        .collect();

    Ok(DailyPayrollResult {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        date,
        daily_standard: employee.daily_standard,
        shifts: shift_details,
        total_hours: round_hours(aggregate.total_hours()),
        night_hours_in_window: round_hours(aggregate.night_hours()),
        night_rule_active: aggregate.night_rule_active,
        overtime_threshold: aggregate.threshold,
        hours_100: round_hours(aggregate.tiers.hours_100),
        hours_125: round_hours(aggregate.tiers.hours_125),
        hours_150: round_hours(aggregate.tiers.hours_150),
        max_rate: selection.max_rate,
        salary_simulation: round_money(salary.amount),
        daily_deficit: round_hours(aggregate.deficit),
        hours_by_subsidiary,
        hours_by_role,
        audit_trace: AuditTrace { steps, warnings },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn employee() -> Employee {
        Employee::new("E001", "Dana Levi")
    }

    fn roles() -> Vec<AllowedRole> {
        vec![
            AllowedRole {
                employee_id: "E001".to_string(),
                subsidiary: "Alpha".to_string(),
                role: "Driver".to_string(),
                hourly_rate: dec("52.00"),
            },
            AllowedRole {
                employee_id: "E001".to_string(),
                subsidiary: "Beta".to_string(),
                role: "Guard".to_string(),
                hourly_rate: dec("40.00"),
            },
        ]
    }

    fn make_shift(id: &str, subsidiary: &str, role: &str, start: &str, end: &str) -> Shift {
        Shift {
            id: id.to_string(),
            employee_id: "E001".to_string(),
            date: date(),
            subsidiary: subsidiary.to_string(),
            role: role.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    fn compute(shifts: &[Shift]) -> DailyPayrollResult {
        compute_daily(&employee(), date(), &roles(), shifts).unwrap()
    }

    #[test]
    fn test_day_shift_with_first_tier_overtime() {
        let result = compute(&[make_shift("1", "Alpha", "Driver", "08:00", "18:00")]);

        assert_eq!(result.total_hours, dec("10"));
        assert_eq!(result.overtime_threshold, dec("8"));
        assert!(!result.night_rule_active);
        assert_eq!(result.hours_100, dec("8"));
        assert_eq!(result.hours_125, dec("2"));
        assert_eq!(result.hours_150, Decimal::ZERO);
        assert_eq!(result.max_rate, dec("52.00"));
        assert_eq!(result.salary_simulation.to_string(), "546.00");
        assert_eq!(result.daily_deficit, Decimal::ZERO);
    }

    #[test]
    fn test_overnight_shift_uses_night_threshold() {
        let result = compute(&[make_shift("1", "Beta", "Guard", "20:00", "06:00")]);

        assert_eq!(result.total_hours, dec("10"));
        assert_eq!(result.night_hours_in_window, dec("8"));
        assert!(result.night_rule_active);
        assert_eq!(result.overtime_threshold, dec("7"));
        assert_eq!(result.hours_100, dec("7"));
        assert_eq!(result.hours_125, dec("2"));
        assert_eq!(result.hours_150, dec("1"));
        assert!(result.shifts[0].cross_midnight);
    }

    #[test]
    fn test_split_shift_day() {
        let result = compute(&[
            make_shift("1", "Alpha", "Driver", "06:00", "11:00"),
            make_shift("2", "Alpha", "Driver", "13:00", "19:00"),
        ]);

        assert_eq!(result.total_hours, dec("11"));
        assert_eq!(result.night_hours_in_window, Decimal::ZERO);
        assert_eq!(result.hours_100, dec("8"));
        assert_eq!(result.hours_125, dec("2"));
        assert_eq!(result.hours_150, dec("1"));
        // 8 x 52 + 2 x 65 + 1 x 78
        assert_eq!(result.salary_simulation, dec("624.00"));
    }

    #[test]
    fn test_max_rate_applies_to_whole_day() {
        let result = compute(&[
            make_shift("1", "Beta", "Guard", "06:00", "10:00"),
            make_shift("2", "Alpha", "Driver", "11:00", "15:00"),
        ]);

        assert_eq!(result.max_rate, dec("52.00"));
        assert_eq!(result.salary_simulation, dec("416.00"));
        assert_eq!(result.shifts[0].hourly_rate, Some(dec("40.00")));
        assert_eq!(result.shifts[1].hourly_rate, Some(dec("52.00")));
    }

    #[test]
    fn test_no_shifts_gives_zero_result() {
        let result = compute(&[]);

        assert!(result.is_empty());
        assert_eq!(result.total_hours, Decimal::ZERO);
        assert_eq!(result.hours_100, Decimal::ZERO);
        assert_eq!(result.max_rate, Decimal::ZERO);
        assert_eq!(result.salary_simulation, dec("0.00"));
        assert_eq!(result.daily_deficit, dec("8"));
        assert!(result.hours_by_role.is_empty());
    }

    #[test]
    fn test_other_employees_and_dates_are_ignored() {
        let mut other_employee = make_shift("2", "Alpha", "Driver", "08:00", "12:00");
        other_employee.employee_id = "E002".to_string();
        let mut other_day = make_shift("3", "Alpha", "Driver", "08:00", "12:00");
        other_day.date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        let result = compute(&[
            make_shift("1", "Alpha", "Driver", "13:00", "15:00"),
            other_employee,
            other_day,
        ]);

        assert_eq!(result.shifts.len(), 1);
        assert_eq!(result.total_hours, dec("2"));
    }

    #[test]
    fn test_unrated_shift_counts_hours_and_warns() {
        let result = compute(&[
            make_shift("1", "Alpha", "Driver", "08:00", "12:00"),
            make_shift("2", "Gamma", "Cook", "13:00", "15:00"),
        ]);

        assert_eq!(result.total_hours, dec("6"));
        assert_eq!(result.max_rate, dec("52.00"));
        assert_eq!(result.salary_simulation, dec("312.00"));
        assert_eq!(result.shifts[1].hourly_rate, None);

        let warning = &result.audit_trace.warnings[0];
        assert_eq!(warning.code, "UNRATED_SHIFT");
        assert!(warning.message.contains("Gamma / Cook"));
    }

    #[test]
    fn test_only_unrated_shifts_pay_nothing() {
        let result = compute(&[make_shift("1", "Gamma", "Cook", "08:00", "12:00")]);

        assert_eq!(result.total_hours, dec("4"));
        assert_eq!(result.max_rate, Decimal::ZERO);
        assert_eq!(result.salary_simulation, dec("0.00"));
    }

    #[test]
    fn test_overlapping_shifts_warn_but_count() {
        let result = compute(&[
            make_shift("1", "Alpha", "Driver", "08:00", "12:00"),
            make_shift("2", "Alpha", "Driver", "11:00", "13:00"),
        ]);

        assert_eq!(result.total_hours, dec("6"));
        assert!(
            result
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == "OVERLAPPING_SHIFTS")
        );
    }

    #[test]
    fn test_hours_are_rounded_to_four_places() {
        // 20 minutes
        let result = compute(&[make_shift("1", "Alpha", "Driver", "08:00", "08:20")]);

        assert_eq!(result.total_hours, dec("0.3333"));
        assert_eq!(result.hours_100, dec("0.3333"));
        assert_eq!(result.daily_deficit, dec("7.6667"));
        // 52 / 3
        assert_eq!(result.salary_simulation, dec("17.33"));
    }

    #[test]
    fn test_breakdowns_by_subsidiary_and_role() {
        let result = compute(&[
            make_shift("1", "Alpha", "Driver", "06:00", "10:00"),
            make_shift("2", "Beta", "Guard", "10:30", "12:00"),
        ]);

        assert_eq!(result.hours_by_subsidiary["Alpha"], dec("4"));
        assert_eq!(result.hours_by_subsidiary["Beta"], dec("1.5"));
        assert_eq!(result.hours_by_role["Guard"], dec("1.5"));
    }

    #[test]
    fn test_idempotent_with_identical_json() {
        let shifts = vec![
            make_shift("2", "Beta", "Guard", "22:00", "02:00"),
            make_shift("1", "Alpha", "Driver", "06:00", "11:00"),
        ];

        let first = compute(&shifts);
        let second = compute(&shifts);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_audit_trace_order() {
        let result = compute(&[make_shift("1", "Alpha", "Driver", "08:00", "18:00")]);

        let ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "shift_measurement",
                "overtime_threshold",
                "hour_tiers",
                "max_rate_selection",
                "salary_simulation"
            ]
        );
        let numbers: Vec<u32> = result.audit_trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_custom_rules() {
        let rules = PayrollRules {
            standard_threshold_hours: dec("9"),
            ..PayrollRules::default()
        };
        let result = compute_daily_with_rules(
            &employee(),
            date(),
            &roles(),
            &[make_shift("1", "Alpha", "Driver", "08:00", "18:00")],
            &rules,
        )
        .unwrap();

        assert_eq!(result.overtime_threshold, dec("9"));
        assert_eq!(result.hours_125, dec("1"));
    }

    #[test]
    fn test_invalid_employee_is_rejected() {
        let mut employee = employee();
        employee.daily_standard = Decimal::ZERO;

        let result = compute_daily(&employee, date(), &roles(), &[]);
        assert!(matches!(result, Err(EngineError::InvalidEmployee { .. })));
    }

    #[test]
    fn test_zero_duration_shift_is_rejected() {
        let result = compute_daily(
            &employee(),
            date(),
            &roles(),
            &[make_shift("1", "Alpha", "Driver", "09:00", "09:00")],
        );

        assert!(matches!(result, Err(EngineError::InvalidShift { .. })));
    }

    #[test]
    fn test_round_money_midpoint_away_from_zero() {
        assert_eq!(round_money(dec("0.125")), dec("0.13"));
        assert_eq!(round_money(dec("0.124")), dec("0.12"));
    }

    fn shift_strategy() -> impl Strategy<Value = (u32, u32)> {
        (0u32..1440, 1u32..1440).prop_map(|(start, length)| (start, (start + length) % 1440))
    }

    fn clock(minutes: u32) -> String {
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    proptest! {
        #[test]
        fn prop_tiers_sum_to_total(spans in proptest::collection::vec(shift_strategy(), 0..5)) {
            let shifts: Vec<Shift> = spans
                .iter()
                .enumerate()
                .map(|(i, (start, end))| {
                    make_shift(&i.to_string(), "Alpha", "Driver", &clock(*start), &clock(*end))
                })
                .collect();

            let result = compute(&shifts);
            let sum = result.hours_100 + result.hours_125 + result.hours_150;

            prop_assert!((sum - result.total_hours).abs() <= dec("0.000000001"));
            prop_assert!(result.hours_100 <= result.overtime_threshold);
            prop_assert!(result.hours_125 <= dec("2"));
        }

        #[test]
        fn prop_threshold_follows_night_hours(spans in proptest::collection::vec(shift_strategy(), 1..4)) {
            let shifts: Vec<Shift> = spans
                .iter()
                .enumerate()
                .map(|(i, (start, end))| {
                    make_shift(&i.to_string(), "Alpha", "Driver", &clock(*start), &clock(*end))
                })
                .collect();

            let result = compute(&shifts);
            let expected = if result.night_hours_in_window >= dec("2") { dec("7") } else { dec("8") };

            prop_assert_eq!(result.overtime_threshold, expected);
            prop_assert_eq!(result.night_rule_active, result.night_hours_in_window >= dec("2"));
        }
    }
}
