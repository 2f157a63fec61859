//! In-memory payroll dataset.
//!
//! Holds the employees, their allowed roles and the recorded shifts that
//! the service calculates from. The dataset is the only place lookups fail
//! with `EmployeeNotFound`; the calculation functions receive already
//! resolved records.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::calculation::{compute_daily_with_rules, ensure_role_allowed, find_overlap};
use crate::error::{EngineError, EngineResult};
use crate::models::{AllowedRole, DailyPayrollResult, Employee, NewShift, Shift};

use super::types::PayrollRules;

/// The outcome of recording a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftAdded {
    /// The stored shift, including its generated id.
    pub shift: Shift,
    /// Set when the shift overlaps one already recorded that day.
    pub warning: Option<String>,
}

/// Employees, allowed roles and shifts loaded for the service.
#[derive(Debug, Clone, Default)]
pub struct PayrollDataset {
    employees: Vec<Employee>,
    allowed_roles: Vec<AllowedRole>,
    shifts: Vec<Shift>,
}

impl PayrollDataset {
    /// Creates a dataset from its three tables.
    pub fn new(employees: Vec<Employee>, allowed_roles: Vec<AllowedRole>, shifts: Vec<Shift>) -> Self {
        Self {
            employees,
            allowed_roles,
            shifts,
        }
    }

    /// Returns all employees in load order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns all employees sorted by name.
    pub fn employees_by_name(&self) -> Vec<&Employee> {
        let mut employees: Vec<&Employee> = self.employees.iter().collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        employees
    }

    /// Returns every allowed-role row.
    pub fn allowed_roles(&self) -> &[AllowedRole] {
        &self.allowed_roles
    }

    /// Returns every recorded shift.
    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    /// Looks up an employee by id.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound` when no employee has the id.
    pub fn get_employee(&self, employee_id: &str) -> EngineResult<&Employee> {
        self.employees
            .iter()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Returns the employee's allowed roles sorted by subsidiary, then role.
    pub fn allowed_roles_for(&self, employee_id: &str) -> Vec<&AllowedRole> {
        let mut roles: Vec<&AllowedRole> = self
            .allowed_roles
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .collect();
        roles.sort_by(|a, b| {
            a.subsidiary
                .cmp(&b.subsidiary)
                .then_with(|| a.role.cmp(&b.role))
        });
        roles
    }

    /// Returns the employee's shifts on a date sorted by start time.
    ///
    /// Shifts whose start time does not parse sort last.
    pub fn shifts_for(&self, employee_id: &str, date: NaiveDate) -> Vec<&Shift> {
        let mut shifts: Vec<&Shift> = self
            .shifts
            .iter()
            .filter(|s| s.employee_id == employee_id && s.date == date)
            .collect();
        shifts.sort_by_key(|s| {
            let start = s.clock_minutes().map(|(start, _)| start).unwrap_or(u32::MAX);
            (start, s.id.clone())
        });
        shifts
    }

    /// Validates and records a new shift under a fresh id.
    ///
    /// Checks run in order: time format, non-zero duration, employee
    /// existence, allowed subsidiary/role. An overlap with a shift already
    /// recorded that day is reported as a warning and the shift is stored
    /// anyway.
    ///
    /// # Errors
    ///
    /// `FormatError`, `InvalidShift`, `EmployeeNotFound` or `RoleNotAllowed`.
    pub fn add_shift(&mut self, new_shift: NewShift) -> EngineResult<ShiftAdded> {
        let shift = new_shift.into_shift(Uuid::new_v4().to_string());
        shift.validate()?;
        self.get_employee(&shift.employee_id)?;
        ensure_role_allowed(
            &self.allowed_roles,
            &shift.employee_id,
            &shift.subsidiary,
            &shift.role,
        )?;

        let warning = find_overlap(&shift, &self.shifts)?.map(|existing| {
            format!(
                "Warning: shift overlaps with existing shift {}-{}",
                existing.start_time, existing.end_time
            )
        });

        self.shifts.push(shift.clone());
        Ok(ShiftAdded { shift, warning })
    }

    /// Removes a shift by id. Returns true if a shift was removed.
    pub fn remove_shift(&mut self, shift_id: &str) -> bool {
        let before = self.shifts.len();
        self.shifts.retain(|s| s.id != shift_id);
        self.shifts.len() != before
    }

    /// Calculates the daily payroll result of an employee on a date.
    ///
    /// # Errors
    ///
    /// `EmployeeNotFound` for an unknown id, plus any calculation error.
    pub fn daily_result(
        &self,
        employee_id: &str,
        date: NaiveDate,
        rules: &PayrollRules,
    ) -> EngineResult<DailyPayrollResult> {
        let employee = self.get_employee(employee_id)?;
        compute_daily_with_rules(employee, date, &self.allowed_roles, &self.shifts, rules)
    }
}
