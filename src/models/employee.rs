//! Employee model.
//!
//! This module defines the Employee struct for representing workers
//! whose daily payroll is calculated by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The contractual standard day when none is configured: 8 hours.
pub const DEFAULT_DAILY_STANDARD: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

fn default_daily_standard() -> Decimal {
    DEFAULT_DAILY_STANDARD
}

/// Represents an employee subject to daily payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contractual standard daily hours, used for the daily deficit.
    #[serde(default = "default_daily_standard")]
    pub daily_standard: Decimal,
}

impl Employee {
    /// Creates an employee with the default 8 hour standard day.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, DEFAULT_DAILY_STANDARD};
    ///
    /// let employee = Employee::new("E001", "Dana Levi");
    /// assert_eq!(employee.daily_standard, DEFAULT_DAILY_STANDARD);
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            daily_standard: DEFAULT_DAILY_STANDARD,
        }
    }

    /// Checks that the daily standard is a positive number of hours.
    pub fn validate(&self) -> EngineResult<()> {
        if self.daily_standard <= Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: "daily_standard".to_string(),
                message: format!(
                    "must be positive, got {} for employee {}",
                    self.daily_standard, self.id
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_employee_with_standard() {
        let json = r#"{
            "id": "E002",
            "name": "Avi Cohen",
            "daily_standard": "8.6"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "E002");
        assert_eq!(employee.name, "Avi Cohen");
        assert_eq!(employee.daily_standard, Decimal::from_str("8.6").unwrap());
    }

    #[test]
    fn test_missing_daily_standard_defaults_to_8() {
        let json = r#"{ "id": "E003", "name": "Noa Mizrahi" }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.daily_standard, Decimal::new(8, 0));
    }

    #[test]
    fn test_serialize_employee() {
        let employee = Employee::new("E001", "Dana Levi");
        let json = serde_json::to_string(&employee).unwrap();

        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_validate_rejects_zero_standard() {
        let mut employee = Employee::new("E001", "Dana Levi");
        employee.daily_standard = Decimal::ZERO;

        match employee.validate() {
            Err(EngineError::InvalidEmployee { field, .. }) => {
                assert_eq!(field, "daily_standard");
            }
            other => panic!("Expected InvalidEmployee, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_default_standard() {
        assert!(Employee::new("E001", "Dana Levi").validate().is_ok());
    }
}
