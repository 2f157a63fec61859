//! Configuration loading and management for the payroll engine.
//!
//! This module provides the payroll rules, the YAML-backed dataset of
//! employees, allowed roles and shifts, and the service settings read from
//! the environment.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/demo").unwrap();
//! println!("Night threshold: {}", loader.rules().night_threshold_hours);
//! ```

mod dataset;
mod loader;
mod settings;
mod types;

pub use dataset::{PayrollDataset, ShiftAdded};
pub use loader::ConfigLoader;
pub use settings::{
    API_TOKEN_VAR, BIND_ADDR_VAR, DATA_DIR_VAR, ServiceSettings, TIMEZONE_VAR,
};
pub use types::{AllowedRolesFile, EmployeesFile, PayrollRules, ShiftsFile};
