//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition the engine and its host service can raise.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::FormatError {
///     input: "25:00".to_string(),
///     message: "hours must be between 0 and 23".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid time '25:00': hours must be between 0 and 23"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A wall-clock time string was not of the form `H:MM` or `HH:MM`.
    #[error("Invalid time '{input}': {message}")]
    FormatError {
        /// The string that failed to parse.
        input: String,
        /// A description of what was wrong with it.
        message: String,
    },

    /// No employee exists with the requested identifier.
    #[error("Employee {employee_id} not found")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// The (subsidiary, role) combination is not permitted for the employee.
    #[error(
        "Combination subsidiary='{subsidiary}' / role='{role}' not allowed for employee {employee_id}"
    )]
    RoleNotAllowed {
        /// The employee the shift belongs to.
        employee_id: String,
        /// The requested subsidiary.
        subsidiary: String,
        /// The requested role.
        role: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_displays_input_and_message() {
        let error = EngineError::FormatError {
            input: "7h30".to_string(),
            message: "expected HH:MM".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid time '7h30': expected HH:MM");
    }

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = EngineError::EmployeeNotFound {
            employee_id: "E999".to_string(),
        };
        assert_eq!(error.to_string(), "Employee E999 not found");
    }

    #[test]
    fn test_invalid_shift_displays_id_and_message() {
        let error = EngineError::InvalidShift {
            shift_id: "shift_001".to_string(),
            message: "zero duration".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid shift 'shift_001': zero duration");
    }

    #[test]
    fn test_role_not_allowed_displays_combination() {
        let error = EngineError::RoleNotAllowed {
            employee_id: "E001".to_string(),
            subsidiary: "Beta Retail".to_string(),
            role: "Cashier".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Combination subsidiary='Beta Retail' / role='Cashier' not allowed for employee E001"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/data/employees.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/data/employees.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                employee_id: "E404".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
