//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints: the token-protected
//! `/v1/payroll/daily` route plus the shift management and lookup routes.

mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use auth::check_bearer_token;
pub use handlers::create_router;
pub use request::{DailyPayrollParams, DailyPayrollQuery, ShiftRequest};
pub use response::{
    AddShiftResponse, ApiError, ApiErrorBody, ApiErrorResponse, DailyPayrollResponse,
    ShiftListEntry, StatusResponse,
};
pub use state::AppState;
