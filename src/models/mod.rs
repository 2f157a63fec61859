//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allowed_role;
mod daily_result;
mod employee;
mod shift;

pub use allowed_role::AllowedRole;
pub use daily_result::{AuditStep, AuditTrace, AuditWarning, DailyPayrollResult, ShiftDetail};
pub use employee::{DEFAULT_DAILY_STANDARD, Employee};
pub use shift::{NewShift, Shift};
