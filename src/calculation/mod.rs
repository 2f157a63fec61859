//! Calculation logic for the daily payroll engine.
//!
//! This module contains every step of the daily calculation: wall-clock
//! time parsing, night-window overlap, cross-shift aggregation, the
//! overtime threshold and tier split, max-rate selection, shift validation
//! and the final assembly of a [`DailyPayrollResult`](crate::models::DailyPayrollResult).
//!
//! All functions here are pure. They take their lookup tables as explicit
//! arguments and never log or perform I/O.

mod daily_aggregation;
mod daily_payroll;
mod night_window;
mod overtime_tiers;
mod rate_selection;
mod shift_validation;
mod time_arithmetic;

pub use daily_aggregation::{
    DailyAggregate, MeasuredShift, aggregate_day, daily_deficit, measure_shift,
};
pub use daily_payroll::{
    HOURS_DECIMAL_PLACES, MONEY_DECIMAL_PLACES, SalarySimulation, compute_daily,
    compute_daily_with_rules, round_hours, round_money, simulate_salary,
};
pub use night_window::{
    NIGHT_WINDOWS, night_overlap_hours, night_overlap_minutes, shift_hours_and_night,
};
pub use overtime_tiers::{
    HourTiers, OvertimeThreshold, TierSplit, determine_overtime_threshold, split_into_tiers,
};
pub use rate_selection::{RateSelection, lookup_rate, select_max_rate};
pub use shift_validation::{
    ensure_role_allowed, find_overlap, normalized_span, overlapping_pairs, spans_overlap,
};
pub use time_arithmetic::{
    MINUTES_PER_DAY, crosses_midnight, minutes_to_hours, parse_minutes, parse_time,
    shift_duration, shift_duration_minutes,
};
