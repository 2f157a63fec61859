//! Shift model.
//!
//! This module defines the raw clock-in/clock-out record the engine
//! aggregates. Times are wall-clock `HH:MM` strings without a date; an end
//! time at or before the start time means the shift ran past midnight.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    crosses_midnight, minutes_to_hours, night_overlap_minutes, parse_minutes,
    shift_duration_minutes,
};
use crate::error::{EngineError, EngineResult};

/// Represents one raw shift record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The employee who worked the shift.
    pub employee_id: String,
    /// The calendar date the shift is booked on.
    pub date: NaiveDate,
    /// The subsidiary the work was done for.
    pub subsidiary: String,
    /// The role performed.
    pub role: String,
    /// Clock-in time, `HH:MM`.
    pub start_time: String,
    /// Clock-out time, `HH:MM`.
    pub end_time: String,
}

impl Shift {
    /// Parses both clock times into minutes since midnight.
    pub fn clock_minutes(&self) -> EngineResult<(u32, u32)> {
        Ok((parse_minutes(&self.start_time)?, parse_minutes(&self.end_time)?))
    }

    /// Returns the shift duration in whole minutes.
    pub fn duration_minutes(&self) -> EngineResult<u32> {
        let (start, end) = self.clock_minutes()?;
        Ok(shift_duration_minutes(start, end))
    }

    /// Calculates the worked hours for the shift.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Shift;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let shift = Shift {
    ///     id: "1".to_string(),
    ///     employee_id: "E001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
    ///     subsidiary: "Alpha Logistics".to_string(),
    ///     role: "Driver".to_string(),
    ///     start_time: "22:00".to_string(),
    ///     end_time: "06:00".to_string(),
    /// };
    /// assert_eq!(shift.worked_hours().unwrap(), Decimal::new(8, 0));
    /// ```
    pub fn worked_hours(&self) -> EngineResult<Decimal> {
        Ok(minutes_to_hours(self.duration_minutes()?))
    }

    /// Returns the hours of this shift falling inside the 22:00-06:00 window.
    pub fn night_hours(&self) -> EngineResult<Decimal> {
        let (start, end) = self.clock_minutes()?;
        Ok(minutes_to_hours(night_overlap_minutes(start, end)))
    }

    /// Returns true if the shift runs past midnight.
    pub fn crosses_midnight(&self) -> EngineResult<bool> {
        let (start, end) = self.clock_minutes()?;
        Ok(crosses_midnight(start, end))
    }

    /// Checks that both times parse and that the shift is not zero length.
    ///
    /// A start equal to the end is rejected rather than read as a 24 hour
    /// shift.
    pub fn validate(&self) -> EngineResult<()> {
        let (start, end) = self.clock_minutes()?;
        if start == end {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: format!(
                    "end time equals start time ({}), shift has zero duration",
                    self.start_time.trim()
                ),
            });
        }
        Ok(())
    }
}

/// A shift submitted for recording, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShift {
    /// The employee who worked the shift.
    pub employee_id: String,
    /// The calendar date the shift is booked on.
    pub date: NaiveDate,
    /// The subsidiary the work was done for.
    pub subsidiary: String,
    /// The role performed.
    pub role: String,
    /// Clock-in time, `HH:MM`.
    pub start_time: String,
    /// Clock-out time, `HH:MM`.
    pub end_time: String,
}

impl NewShift {
    /// Turns the submission into a stored shift with the given id.
    pub fn into_shift(self, id: impl Into<String>) -> Shift {
        Shift {
            id: id.into(),
            employee_id: self.employee_id,
            date: self.date,
            subsidiary: self.subsidiary,
            role: self.role,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_shift_into_shift() {
        let new_shift = NewShift {
            employee_id: "E001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            subsidiary: "Alpha Logistics".to_string(),
            role: "Driver".to_string(),
            start_time: "08:00".to_string(),
            end_time: "12:00".to_string(),
        };

        let shift = new_shift.into_shift("SH-010");
        assert_eq!(shift.id, "SH-010");
        assert_eq!(shift.worked_hours().unwrap(), Decimal::new(4, 0));
    }

    fn make_shift(id: &str, start: &str, end: &str) -> Shift {
        Shift {
            id: id.to_string(),
            employee_id: "E001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            subsidiary: "Alpha Logistics".to_string(),
            role: "Driver".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    #[test]
    fn test_8_hour_day_shift() {
        let shift = make_shift("SH-001", "09:00", "17:00");
        assert_eq!(shift.worked_hours().unwrap(), Decimal::new(8, 0));
        assert!(!shift.crosses_midnight().unwrap());
    }

    #[test]
    fn test_overnight_shift() {
        let shift = make_shift("SH-002", "23:00", "03:00");
        assert_eq!(shift.worked_hours().unwrap(), Decimal::new(4, 0));
        assert_eq!(shift.night_hours().unwrap(), Decimal::new(4, 0));
        assert!(shift.crosses_midnight().unwrap());
    }

    #[test]
    fn test_half_hour_shift() {
        let shift = make_shift("SH-003", "06:00", "14:30");
        assert_eq!(shift.worked_hours().unwrap(), Decimal::new(85, 1));
    }

    #[test]
    fn test_zero_duration_shift_is_invalid() {
        let shift = make_shift("SH-004", "09:00", "09:00");

        match shift.validate() {
            Err(EngineError::InvalidShift { shift_id, message }) => {
                assert_eq!(shift_id, "SH-004");
                assert!(message.contains("zero duration"));
            }
            other => panic!("Expected InvalidShift, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_time_is_format_error() {
        let shift = make_shift("SH-005", "9am", "17:00");
        assert!(matches!(
            shift.validate(),
            Err(EngineError::FormatError { .. })
        ));
        assert!(shift.worked_hours().is_err());
    }

    #[test]
    fn test_shift_deserialization() {
        let json = r#"{
            "id": "shift_001",
            "employee_id": "E001",
            "date": "2026-03-01",
            "subsidiary": "Alpha Logistics",
            "role": "Driver",
            "start_time": "08:00",
            "end_time": "18:00"
        }"#;

        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.id, "shift_001");
        assert_eq!(shift.date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(shift.worked_hours().unwrap(), Decimal::new(10, 0));
    }
}
