//! Daily payroll engine
//!
//! This crate calculates one employee's pay for one calendar day from raw
//! clock-in/clock-out shifts: worked and night-window hours are summed
//! across split shifts, bucketed into 100% / 125% / 150% tiers against an
//! 8 or 7 hour threshold, and priced at the highest rate among the
//! subsidiary/role pairs worked.
//!
//! The [`calculation`] module is pure; the [`api`] module serves it over
//! HTTP from a YAML dataset loaded by [`config`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
