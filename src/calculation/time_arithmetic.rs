//! Wall-clock time arithmetic.
//!
//! Shift times are `H:MM` or `HH:MM` strings with no date component. They are
//! parsed into whole minutes since midnight so that every later step works on
//! exact integers; conversion to fractional hours happens only at the edges.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

const MINUTES_PER_HOUR: u32 = 60;

/// Parses a wall-clock time into minutes since midnight.
///
/// Accepts `H:MM` or `HH:MM` with hours 0-23 and exactly two minute digits
/// 00-59. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`EngineError::FormatError`] for any other input: a missing or
/// different separator, non-digit characters, or out-of-range values.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::parse_minutes;
///
/// assert_eq!(parse_minutes("06:30").unwrap(), 390);
/// assert_eq!(parse_minutes("6:30").unwrap(), 390);
/// assert!(parse_minutes("24:00").is_err());
/// assert!(parse_minutes("06.30").is_err());
/// ```
pub fn parse_minutes(input: &str) -> EngineResult<u32> {
    let format_error = |message: &str| EngineError::FormatError {
        input: input.to_string(),
        message: message.to_string(),
    };

    let (hours, minutes) = input
        .trim()
        .split_once(':')
        .ok_or_else(|| format_error("expected H:MM or HH:MM"))?;

    if hours.is_empty() || hours.len() > 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format_error("hours must be one or two digits"));
    }
    if minutes.len() != 2 || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format_error("minutes must be exactly two digits"));
    }

    let hours: u32 = hours
        .parse()
        .map_err(|_| format_error("hours are not a number"))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| format_error("minutes are not a number"))?;

    if hours > 23 {
        return Err(format_error("hours must be between 0 and 23"));
    }
    if minutes > 59 {
        return Err(format_error("minutes must be between 0 and 59"));
    }

    Ok(hours * MINUTES_PER_HOUR + minutes)
}

/// Parses a wall-clock time into fractional hours.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::parse_time;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_time("06:30").unwrap(), Decimal::new(65, 1));
/// assert_eq!(parse_time("00:00").unwrap(), Decimal::ZERO);
/// ```
pub fn parse_time(input: &str) -> EngineResult<Decimal> {
    Ok(minutes_to_hours(parse_minutes(input)?))
}

/// Converts whole minutes into hours.
pub fn minutes_to_hours(minutes: u32) -> Decimal {
    Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR)
}

/// Returns the duration between two clock times given in hours.
///
/// An end at or before the start is read as crossing midnight. A zero
/// length shift is the caller's to reject; here `end == start` yields 24.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::shift_duration;
/// use rust_decimal::Decimal;
///
/// let ten = Decimal::new(10, 0);
/// assert_eq!(shift_duration(Decimal::new(8, 0), Decimal::new(18, 0)), ten);
/// assert_eq!(shift_duration(Decimal::new(20, 0), Decimal::new(6, 0)), ten);
/// ```
pub fn shift_duration(start: Decimal, end: Decimal) -> Decimal {
    if end > start {
        end - start
    } else {
        end + Decimal::from(24) - start
    }
}

/// Minute-precision variant of [`shift_duration`].
pub fn shift_duration_minutes(start: u32, end: u32) -> u32 {
    if end > start {
        end - start
    } else {
        end + MINUTES_PER_DAY - start
    }
}

/// Returns true when a shift with these clock times runs past midnight.
pub fn crosses_midnight(start: u32, end: u32) -> bool {
    end <= start
}
