//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a payroll
//! data directory from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::dataset::PayrollDataset;
use super::types::{AllowedRolesFile, EmployeesFile, PayrollRules, ShiftsFile};

/// Loads and provides access to a payroll data directory.
///
/// # Directory Structure
///
/// ```text
/// config/demo/
/// ├── employees.yaml      # Employees and their standard day
/// ├── allowed_roles.yaml  # Subsidiary/role combinations with hourly rates
/// ├── shifts.yaml         # Recorded shifts (optional)
/// └── rules.yaml          # Threshold and multiplier overrides (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/demo").unwrap();
/// println!("Loaded {} employees", loader.dataset().employees().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    dataset: PayrollDataset,
    rules: PayrollRules,
}

impl ConfigLoader {
    /// Loads the data directory at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `employees.yaml` or `allowed_roles.yaml` is missing
    /// - Any file contains invalid YAML
    /// - An employee id is duplicated or a standard day is not positive
    /// - An hourly rate is not positive
    /// - A stored shift has a malformed time or zero duration
    /// - A rule value is not positive
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let employees_path = path.join("employees.yaml");
        let employees = Self::load_yaml::<EmployeesFile>(&employees_path)?.employees;
        let mut seen = HashSet::new();
        for employee in &employees {
            if !seen.insert(employee.id.as_str()) {
                return Err(Self::invalid(
                    &employees_path,
                    format!("duplicate employee id {}", employee.id),
                ));
            }
            employee
                .validate()
                .map_err(|e| Self::invalid(&employees_path, e.to_string()))?;
        }

        let roles_path = path.join("allowed_roles.yaml");
        let allowed_roles = Self::load_yaml::<AllowedRolesFile>(&roles_path)?.allowed_roles;
        if let Some(row) = allowed_roles.iter().find(|r| r.hourly_rate <= Decimal::ZERO) {
            return Err(Self::invalid(
                &roles_path,
                format!(
                    "hourly_rate must be positive, got {} for {} / {} / {}",
                    row.hourly_rate, row.employee_id, row.subsidiary, row.role
                ),
            ));
        }

        let shifts_path = path.join("shifts.yaml");
        let shifts = if shifts_path.exists() {
            Self::load_yaml::<ShiftsFile>(&shifts_path)?.shifts
        } else {
            Vec::new()
        };
        for shift in &shifts {
            shift
                .validate()
                .map_err(|e| Self::invalid(&shifts_path, e.to_string()))?;
        }

        let rules_path = path.join("rules.yaml");
        let rules = if rules_path.exists() {
            Self::load_yaml::<PayrollRules>(&rules_path)?
        } else {
            PayrollRules::default()
        };
        rules
            .validate()
            .map_err(|message| Self::invalid(&rules_path, message))?;

        Ok(Self {
            dataset: PayrollDataset::new(employees, allowed_roles, shifts),
            rules,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn invalid(path: &Path, message: String) -> EngineError {
        EngineError::ConfigParseError {
            path: path.display().to_string(),
            message,
        }
    }

    /// Returns the loaded dataset.
    pub fn dataset(&self) -> &PayrollDataset {
        &self.dataset
    }

    /// Returns the loaded rules.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Splits the loader into its dataset and rules.
    pub fn into_parts(self) -> (PayrollDataset, PayrollRules) {
        (self.dataset, self.rules)
    }
}
