//! Night-window overlap calculation.
//!
//! The night window runs from 22:00 to 06:00. A shift is laid on a 48 hour
//! minute axis (a midnight-crossing end is moved into the second day) and
//! intersected with three sub-windows:
//!
//! - `[0, 360)`: 00:00-06:00 of the booking day, for early shifts that do
//!   not cross midnight (04:00-08:00 has two night hours)
//! - `[1320, 1440)`: 22:00-24:00
//! - `[1440, 1800)`: 00:00-06:00 of the following day
//!
//! All three are required; dropping the first undercounts early-morning
//! shifts.

use rust_decimal::Decimal;

use crate::error::EngineResult;

use super::time_arithmetic::{
    MINUTES_PER_DAY, minutes_to_hours, parse_minutes, shift_duration_minutes,
};

/// The night sub-windows as half-open minute ranges on a 48 hour axis.
pub const NIGHT_WINDOWS: [(u32, u32); 3] = [(0, 6 * 60), (22 * 60, 24 * 60), (24 * 60, 30 * 60)];

/// Returns the minutes of a shift falling inside the night window.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::night_overlap_minutes;
///
/// // 04:00-08:00
/// assert_eq!(night_overlap_minutes(240, 480), 120);
/// // 23:00-03:00
/// assert_eq!(night_overlap_minutes(1380, 180), 240);
/// ```
pub fn night_overlap_minutes(start: u32, end: u32) -> u32 {
    let end = if end <= start {
        end + MINUTES_PER_DAY
    } else {
        end
    };

    NIGHT_WINDOWS
        .iter()
        .map(|&(window_start, window_end)| {
            end.min(window_end)
                .saturating_sub(start.max(window_start))
        })
        .sum()
}

/// Returns the hours of a shift falling inside the night window.
pub fn night_overlap_hours(start: u32, end: u32) -> Decimal {
    minutes_to_hours(night_overlap_minutes(start, end))
}

/// Parses a pair of clock times and returns `(duration, night hours)`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::shift_hours_and_night;
/// use rust_decimal::Decimal;
///
/// let (hours, night) = shift_hours_and_night("20:00", "06:00").unwrap();
/// assert_eq!(hours, Decimal::new(10, 0));
/// assert_eq!(night, Decimal::new(8, 0));
/// ```
pub fn shift_hours_and_night(start: &str, end: &str) -> EngineResult<(Decimal, Decimal)> {
    let start = parse_minutes(start)?;
    let end = parse_minutes(end)?;
    Ok((
        minutes_to_hours(shift_duration_minutes(start, end)),
        night_overlap_hours(start, end),
    ))
}
