//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
};
use chrono::{NaiveDate, SecondsFormat, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::round_hours;
use crate::models::{AllowedRole, DailyPayrollResult, Employee};

use super::auth::check_bearer_token;
use super::request::{DailyPayrollQuery, ShiftRequest, parse_date};
use super::response::{
    AddShiftResponse, ApiError, ApiErrorResponse, DailyPayrollResponse, ShiftListEntry,
    StatusResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/payroll/daily", get(daily_payroll_handler))
        .route("/employees", get(list_employees_handler))
        .route("/allowed/:employee_id", get(allowed_roles_handler))
        .route("/shifts", post(add_shift_handler))
        .route("/shifts/:shift_id", delete(delete_shift_handler))
        .route("/shifts_list/:employee_id/:date", get(list_shifts_handler))
        .route("/daily/:employee_id/:date", get(daily_result_handler))
        .with_state(state)
}

/// Handler for `GET /v1/payroll/daily`.
///
/// Checks run in a fixed order: token, parameters, employee existence,
/// then the calculation itself. A day without shifts is a 404.
async fn daily_payroll_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<DailyPayrollQuery>, QueryRejection>,
) -> ApiResult<DailyPayrollResponse> {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing daily payroll request");

    if let Err(err) = check_bearer_token(&headers, state.api_token()) {
        warn!(correlation_id = %correlation_id, "Invalid or missing API token");
        return Err(err);
    }

    let Query(query) = query.map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Query string rejected"
        );
        ApiErrorResponse::validation(rejection.body_text())
    })?;

    let params = query.validate().map_err(|message| {
        warn!(correlation_id = %correlation_id, error = %message, "Invalid parameters");
        ApiErrorResponse::validation(message)
    })?;

    let start_time = Instant::now();
    let result = {
        let dataset = state.dataset().read().await;
        if dataset.get_employee(&params.employee_id).is_err() {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %params.employee_id,
                "Employee not found"
            );
            return Err(ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", "Employee not found"),
            ));
        }
        dataset
            .daily_result(&params.employee_id, params.date, state.rules())
            .map_err(|err| log_failure(correlation_id, err))?
    };

    if result.is_empty() {
        info!(
            correlation_id = %correlation_id,
            employee_id = %params.employee_id,
            date = %params.date,
            "No shifts for date"
        );
        return Err(ApiErrorResponse::new(
            StatusCode::NOT_FOUND,
            ApiError::new(
                "NO_SHIFTS_FOR_DATE",
                "No shifts found for this employee on the requested date",
            ),
        ));
    }

    log_success(correlation_id, &result, start_time);

    let calculated_at = Utc::now()
        .with_timezone(&state.timezone())
        .to_rfc3339_opts(SecondsFormat::Secs, false);

    Ok(Json(DailyPayrollResponse::from_result(
        result,
        calculated_at,
        params.include_shifts,
        params.include_breakdown,
        params.include_audit,
    )))
}

/// Handler for `GET /daily/:employee_id/:date`.
///
/// Returns the full result, including a zero result for a day without
/// shifts.
async fn daily_result_handler(
    State(state): State<AppState>,
    Path((employee_id, date)): Path<(String, String)>,
) -> ApiResult<DailyPayrollResult> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        date = %date,
        "Processing daily result request"
    );

    let date = path_date(&date)?;
    let start_time = Instant::now();
    let result = state
        .dataset()
        .read()
        .await
        .daily_result(&employee_id, date, state.rules())
        .map_err(|err| log_failure(correlation_id, err))?;

    log_success(correlation_id, &result, start_time);
    Ok(Json(result))
}

/// Handler for `GET /employees`.
async fn list_employees_handler(State(state): State<AppState>) -> Json<Vec<Employee>> {
    let dataset = state.dataset().read().await;
    Json(dataset.employees_by_name().into_iter().cloned().collect())
}

/// Handler for `GET /allowed/:employee_id`.
async fn allowed_roles_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Json<Vec<AllowedRole>> {
    let dataset = state.dataset().read().await;
    Json(
        dataset
            .allowed_roles_for(&employee_id)
            .into_iter()
            .cloned()
            .collect(),
    )
}

/// Handler for `GET /shifts_list/:employee_id/:date`.
async fn list_shifts_handler(
    State(state): State<AppState>,
    Path((employee_id, date)): Path<(String, String)>,
) -> ApiResult<Vec<ShiftListEntry>> {
    let date = path_date(&date)?;
    let dataset = state.dataset().read().await;

    let mut entries = Vec::new();
    for shift in dataset.shifts_for(&employee_id, date) {
        entries.push(ShiftListEntry {
            id: shift.id.clone(),
            subsidiary: shift.subsidiary.clone(),
            role: shift.role.clone(),
            start_time: shift.start_time.clone(),
            end_time: shift.end_time.clone(),
            hours: round_hours(shift.worked_hours()?),
        });
    }
    Ok(Json(entries))
}

/// Handler for `POST /shifts`.
async fn add_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftRequest>, JsonRejection>,
) -> ApiResult<AddShiftResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing add shift request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => ApiError::validation_error(err.body_text()),
                JsonRejection::JsonSyntaxError(err) => {
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            warn!(
                correlation_id = %correlation_id,
                error = %error.message,
                "Shift request rejected"
            );
            return Err(ApiErrorResponse::new(StatusCode::BAD_REQUEST, error));
        }
    };

    let added = state
        .dataset()
        .write()
        .await
        .add_shift(request.into())
        .map_err(|err| log_failure(correlation_id, err))?;

    if let Some(warning) = &added.warning {
        warn!(
            correlation_id = %correlation_id,
            shift_id = %added.shift.id,
            warning = %warning,
            "Shift stored with overlap"
        );
    } else {
        info!(
            correlation_id = %correlation_id,
            shift_id = %added.shift.id,
            employee_id = %added.shift.employee_id,
            "Shift stored"
        );
    }

    Ok(Json(AddShiftResponse {
        status: "ok".to_string(),
        message: "Shift added.".to_string(),
        shift_id: added.shift.id,
        warning: added.warning,
    }))
}

/// Handler for `DELETE /shifts/:shift_id`. Deleting an unknown id succeeds.
async fn delete_shift_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<String>,
) -> Json<StatusResponse> {
    let removed = state.dataset().write().await.remove_shift(&shift_id);
    info!(shift_id = %shift_id, removed, "Processed delete shift request");
    Json(StatusResponse::ok())
}

fn path_date(date: &str) -> Result<NaiveDate, ApiErrorResponse> {
    parse_date(date)
        .ok_or_else(|| ApiErrorResponse::validation("Parameter 'date' must be in YYYY-MM-DD format"))
}

fn log_failure(correlation_id: Uuid, err: crate::error::EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}

fn log_success(correlation_id: Uuid, result: &DailyPayrollResult, start_time: Instant) {
    info!(
        correlation_id = %correlation_id,
        employee_id = %result.employee_id,
        date = %result.date,
        shifts_count = result.shifts.len(),
        total_hours = %result.total_hours,
        salary = %result.salary_simulation,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );
}
