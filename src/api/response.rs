//! Response types for the payroll API.
//!
//! This module defines the success bodies of each route, the error
//! structure and the mapping from [`EngineError`] to HTTP statuses.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AuditTrace, DailyPayrollResult, ShiftDetail};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates an unauthorized error response.
    pub fn unauthorized() -> Self {
        Self::new("UNAUTHORIZED", "Invalid or missing API token")
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// The JSON envelope every error is returned in: `{"error": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// The error itself.
    pub error: ApiError,
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response with the given status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// A 400 `VALIDATION_ERROR`.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::validation_error(message))
    }

    /// A 401 `UNAUTHORIZED`.
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ApiError::unauthorized())
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(ApiErrorBody { error: self.error })).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let details = error.to_string();
        match error {
            EngineError::FormatError { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_TIME_FORMAT",
                    "Invalid time format. Use HH:MM",
                    details,
                ),
            },
            EngineError::EmployeeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details("EMPLOYEE_NOT_FOUND", "Employee not found", details),
            },
            EngineError::InvalidShift { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SHIFT",
                    "End time equals start time, shift has zero duration",
                    details,
                ),
            },
            EngineError::RoleNotAllowed { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("ROLE_NOT_ALLOWED", details),
            },
            EngineError::InvalidEmployee { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    "Stored employee record is invalid",
                    details,
                ),
            },
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", details),
                }
            }
        }
    }
}

/// Body of `GET /v1/payroll/daily`.
///
/// The breakdown maps, shifts and audit trace are omitted when not
/// requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPayrollResponse {
    /// The ID of the employee.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The date calculated.
    pub date: NaiveDate,
    /// Hours paid at 100% before overtime starts.
    pub overtime_threshold: Decimal,
    /// Hours inside the 22:00-06:00 window.
    pub night_hours_in_window: Decimal,
    /// Whether the reduced night threshold applied.
    pub night_rule_active: bool,
    /// Sum of all shift durations.
    pub total_hours: Decimal,
    /// Hours paid at 100%.
    pub hours_100: Decimal,
    /// Hours paid at 125%.
    pub hours_125: Decimal,
    /// Hours paid at 150%.
    pub hours_150: Decimal,
    /// The employee's contractual standard day.
    pub daily_standard: Decimal,
    /// Hours short of the daily standard.
    pub daily_deficit: Decimal,
    /// The rate the day was priced at.
    pub max_rate: Decimal,
    /// Simulated salary for the day.
    pub salary_simulation: Decimal,
    /// When the response was produced, with the service zone's offset.
    pub calculated_at: String,
    /// Hours per subsidiary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_by_subsidiary: Option<BTreeMap<String, Decimal>>,
    /// Hours per role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_by_role: Option<BTreeMap<String, Decimal>>,
    /// Per-shift details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shifts: Option<Vec<ShiftDetail>>,
    /// How the result was derived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_trace: Option<AuditTrace>,
}

impl DailyPayrollResponse {
    /// Builds the response from a result, keeping only the requested parts.
    pub fn from_result(
        result: DailyPayrollResult,
        calculated_at: String,
        include_shifts: bool,
        include_breakdown: bool,
        include_audit: bool,
    ) -> Self {
        let (hours_by_subsidiary, hours_by_role) = if include_breakdown {
            (Some(result.hours_by_subsidiary), Some(result.hours_by_role))
        } else {
            (None, None)
        };

        Self {
            employee_id: result.employee_id,
            employee_name: result.employee_name,
            date: result.date,
            overtime_threshold: result.overtime_threshold,
            night_hours_in_window: result.night_hours_in_window,
            night_rule_active: result.night_rule_active,
            total_hours: result.total_hours,
            hours_100: result.hours_100,
            hours_125: result.hours_125,
            hours_150: result.hours_150,
            daily_standard: result.daily_standard,
            daily_deficit: result.daily_deficit,
            max_rate: result.max_rate,
            salary_simulation: result.salary_simulation,
            calculated_at,
            hours_by_subsidiary,
            hours_by_role,
            shifts: include_shifts.then_some(result.shifts),
            audit_trace: include_audit.then_some(result.audit_trace),
        }
    }
}

/// One row of `GET /shifts_list/:employee_id/:date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftListEntry {
    /// The ID of the shift.
    pub id: String,
    /// The subsidiary the shift was worked for.
    pub subsidiary: String,
    /// The role performed.
    pub role: String,
    /// Clock-in time.
    pub start_time: String,
    /// Clock-out time.
    pub end_time: String,
    /// Duration rounded to 4 decimal places.
    pub hours: Decimal,
}

/// Body of `POST /shifts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddShiftResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Confirmation message.
    pub message: String,
    /// The generated id of the stored shift.
    pub shift_id: String,
    /// Set when the shift overlaps another of the same day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Body of routes that only acknowledge success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always `"ok"`.
    pub status: String,
}

impl StatusResponse {
    /// The `{"status": "ok"}` body.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
