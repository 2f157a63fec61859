//! Request types for the payroll API.
//!
//! This module defines the query string of `/v1/payroll/daily` and the JSON
//! body of `POST /shifts`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::NewShift;

/// The `YYYY-MM-DD` format accepted for dates in queries and paths.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query string of `GET /v1/payroll/daily`.
///
/// Every field is optional at the extractor level so that missing values
/// are reported as `VALIDATION_ERROR` after authentication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyPayrollQuery {
    /// The employee to calculate.
    pub employee_id: Option<String>,
    /// The date to calculate, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Include per-shift details (default true).
    pub include_shifts: Option<String>,
    /// Include hours by subsidiary and role (default true).
    pub include_breakdown: Option<String>,
    /// Include the audit trace (default false).
    pub include_audit: Option<String>,
}

/// The validated form of [`DailyPayrollQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPayrollParams {
    /// The employee to calculate.
    pub employee_id: String,
    /// The date to calculate.
    pub date: NaiveDate,
    /// Include per-shift details.
    pub include_shifts: bool,
    /// Include hours by subsidiary and role.
    pub include_breakdown: bool,
    /// Include the audit trace.
    pub include_audit: bool,
}

impl DailyPayrollQuery {
    /// Checks required parameters and parses the date and flags.
    ///
    /// Returns the message of the first problem found.
    pub fn validate(self) -> Result<DailyPayrollParams, String> {
        let employee_id = self
            .employee_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| "Missing required parameter: employee_id".to_string())?;
        let date = self
            .date
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| "Missing required parameter: date".to_string())?;
        let date = parse_date(&date)
            .ok_or_else(|| "Parameter 'date' must be in YYYY-MM-DD format".to_string())?;

        Ok(DailyPayrollParams {
            employee_id,
            date,
            include_shifts: parse_flag("include_shifts", self.include_shifts.as_deref(), true)?,
            include_breakdown: parse_flag(
                "include_breakdown",
                self.include_breakdown.as_deref(),
                true,
            )?,
            include_audit: parse_flag("include_audit", self.include_audit.as_deref(), false)?,
        })
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

/// Parses a boolean query flag, accepting `true/false`, `1/0`, `yes/no` and
/// `on/off` in any case.
pub fn parse_flag(name: &str, value: Option<&str>, default: bool) -> Result<bool, String> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("Parameter '{}' must be a boolean", name)),
    }
}

/// Request body for `POST /shifts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// The employee who worked the shift.
    pub employee_id: String,
    /// The date the shift is booked on.
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

impl From<ShiftRequest> for NewShift {
    fn from(req: ShiftRequest) -> Self {
        NewShift {
            employee_id: req.employee_id,
            date: req.date,
            subsidiary: req.subsidiary,
            role: req.role,
            start_time: req.start_time,
            end_time: req.end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(employee_id: Option<&str>, date: Option<&str>) -> DailyPayrollQuery {
        DailyPayrollQuery {
            employee_id: employee_id.map(String::from),
            date: date.map(String::from),
            ..DailyPayrollQuery::default()
        }
    }

    #[test]
    fn test_defaults() {
        let params = query(Some("E001"), Some("2026-03-01")).validate().unwrap();

        assert_eq!(params.employee_id, "E001");
        assert_eq!(params.date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert!(params.include_shifts);
        assert!(params.include_breakdown);
        assert!(!params.include_audit);
    }

    #[test]
    fn test_missing_parameters() {
        assert_eq!(
            query(None, Some("2026-03-01")).validate().unwrap_err(),
            "Missing required parameter: employee_id"
        );
        assert_eq!(
            query(Some("E001"), None).validate().unwrap_err(),
            "Missing required parameter: date"
        );
    }

    #[test]
    fn test_bad_date() {
        for date in ["01/03/2026", "2026-13-01", "yesterday"] {
            assert_eq!(
                query(Some("E001"), Some(date)).validate().unwrap_err(),
                "Parameter 'date' must be in YYYY-MM-DD format"
            );
        }
    }

    #[test]
    fn test_flags() {
        assert_eq!(parse_flag("x", Some("FALSE"), true), Ok(false));
        assert_eq!(parse_flag("x", Some("1"), false), Ok(true));
        assert_eq!(parse_flag("x", None, true), Ok(true));
        assert!(parse_flag("x", Some("maybe"), true).is_err());
    }

    #[test]
    fn test_deserialize_shift_request() {
        let json = r#"{
            "employee_id": "E001",
            "date": "2026-03-01",
            "subsidiary": "Alpha Logistics",
            "role": "Driver",
            "start_time": "08:00",
            "end_time": "18:00"
        }"#;

        let request: ShiftRequest = serde_json::from_str(json).unwrap();
        let new_shift: NewShift = request.into();
        assert_eq!(new_shift.employee_id, "E001");
        assert_eq!(new_shift.end_time, "18:00");
    }
}
