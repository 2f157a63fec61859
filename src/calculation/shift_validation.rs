//! Shift validation helpers used when shifts are recorded.
//!
//! Overlapping shifts are reported, never rejected: the day is still paid
//! on the sum of both durations. A subsidiary/role combination the employee
//! is not allowed to work is rejected outright.

use crate::error::{EngineError, EngineResult};
use crate::models::{AllowedRole, Shift};

use super::daily_aggregation::MeasuredShift;
use super::time_arithmetic::MINUTES_PER_DAY;

/// Places a clock-time pair on the 48 hour minute axis.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::normalized_span;
///
/// assert_eq!(normalized_span(480, 1080), (480, 1080));
/// assert_eq!(normalized_span(1380, 180), (1380, 1620));
/// ```
pub fn normalized_span(start: u32, end: u32) -> (u32, u32) {
    if end <= start {
        (start, end + MINUTES_PER_DAY)
    } else {
        (start, end)
    }
}

/// Returns true when two half-open spans share at least one minute.
pub fn spans_overlap(a: (u32, u32), b: (u32, u32)) -> bool {
    !(a.1 <= b.0 || a.0 >= b.1)
}

/// Finds the first existing shift of the same employee and date that
/// overlaps `candidate`.
///
/// Shifts with the candidate's own id are skipped.
///
/// # Errors
///
/// Fails with `FormatError` if any compared shift has an unparseable time.
pub fn find_overlap<'a>(candidate: &Shift, existing: &'a [Shift]) -> EngineResult<Option<&'a Shift>> {
    let (start, end) = candidate.clock_minutes()?;
    let span = normalized_span(start, end);

    for other in existing {
        if other.id == candidate.id
            || other.employee_id != candidate.employee_id
            || other.date != candidate.date
        {
            continue;
        }
        let (other_start, other_end) = other.clock_minutes()?;
        if spans_overlap(span, normalized_span(other_start, other_end)) {
            return Ok(Some(other));
        }
    }
    Ok(None)
}

/// Returns every pair of overlapping shifts in a day, by shift id.
pub fn overlapping_pairs(shifts: &[MeasuredShift]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (i, a) in shifts.iter().enumerate() {
        for b in &shifts[i + 1..] {
            if spans_overlap(a.span(), b.span()) {
                pairs.push((a.shift_id.clone(), b.shift_id.clone()));
            }
        }
    }
    pairs
}

/// Checks that the employee may work the given subsidiary and role.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::ensure_role_allowed;
/// use payroll_engine::models::AllowedRole;
/// use rust_decimal::Decimal;
///
/// let roles = vec![AllowedRole {
///     employee_id: "E001".to_string(),
///     subsidiary: "Alpha Logistics".to_string(),
///     role: "Driver".to_string(),
///     hourly_rate: Decimal::new(5200, 2),
/// }];
///
/// assert!(ensure_role_allowed(&roles, "E001", "Alpha Logistics", "Driver").is_ok());
/// assert!(ensure_role_allowed(&roles, "E001", "Alpha Logistics", "Loader").is_err());
/// ```
pub fn ensure_role_allowed(
    allowed_roles: &[AllowedRole],
    employee_id: &str,
    subsidiary: &str,
    role: &str,
) -> EngineResult<()> {
    let allowed = allowed_roles
        .iter()
        .any(|r| r.employee_id == employee_id && r.matches(subsidiary, role));

    if allowed {
        Ok(())
    } else {
        Err(EngineError::RoleNotAllowed {
            employee_id: employee_id.to_string(),
            subsidiary: subsidiary.to_string(),
            role: role.to_string(),
        })
    }
}
